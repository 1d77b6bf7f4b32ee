// region:    --- Imports
use clap::Parser;
use onbid_client::api::ApiClient;
use onbid_client::cli::Cli;
use onbid_client::config::ClientConfig;
use onbid_client::error::ClientError;
use onbid_client::handlers;
use onbid_client::session::{FileTokenStore, Session};
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info};

// endregion: --- Imports

// region:    --- Main
#[tokio::main]
async fn main() -> ExitCode {
    // logging 초기화
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .without_time()
        .with_target(false)
        .init();

    let cli = Cli::parse();

    // 환경 변수 설정 + --base-url 우선
    let mut config = ClientConfig::from_env();
    if let Some(base_url) = cli.base_url.as_deref() {
        config = config.with_base_url(base_url);
    }
    info!("{:<12} --> API 서버: {}", "Main", config.api_base_url);

    // 토큰 파일 세션
    let session = Session::new(Arc::new(FileTokenStore::new(config.session_file.clone())));

    // 401 응답 시 로그인 안내
    let api = match ApiClient::new(&config, session) {
        Ok(api) => api.with_unauthorized_hook(Arc::new(|| {
            eprintln!("세션이 만료되었습니다. `onbid-client login` 으로 다시 로그인하세요.");
        })),
        Err(e) => {
            error!("{:<12} --> HTTP 클라이언트 생성 실패: {}", "Main", e);
            return ExitCode::from(e.exit_code());
        }
    };

    match handlers::dispatch(cli.command, Arc::new(api), &config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:<12} --> {}", "Main", e);
            eprintln!("{}", e);
            if e == ClientError::Unauthenticated {
                eprintln!("`onbid-client login --email <EMAIL> --password <PASSWORD>` 로 로그인하세요.");
            }
            ExitCode::from(e.exit_code())
        }
    }
}
// endregion: --- Main

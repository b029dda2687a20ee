//! # imgtext
//!
//! 이미지 OCR CLI 진입점.
//! 설정 로드, 어댑터 조립, 컨트롤러 실행 후 렌더링된 뷰를 출력한다.

use anyhow::{anyhow, Context, Result};
use clap::{Parser, ValueEnum};
use imgtext_app::clipboard::SystemClipboard;
use imgtext_app::controller::UploadController;
use imgtext_app::session::{self, SessionOptions, SessionOutcome};
use imgtext_app::view;
use imgtext_core::config::AppConfig;
use imgtext_core::config_manager::ConfigManager;
use imgtext_core::models::ui::CopyTarget;
use imgtext_core::ports::clipboard::Clipboard;
use imgtext_vision::validation;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// 이미지 속 텍스트 추출 (api-ninjas OCR)
#[derive(Parser, Debug)]
#[command(name = "imgtext")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// 업로드할 이미지 파일 (JPEG/PNG)
    file: PathBuf,

    /// 설정 파일 경로 (기본: 플랫폼별 설정 디렉토리의 config.json)
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// OCR API 키 (설정 파일과 IMGTEXT_API_KEY보다 우선)
    #[arg(long)]
    api_key: Option<String>,

    /// `--api-key`로 받은 키를 설정 파일에 저장
    #[arg(long, requires = "api_key")]
    save_key: bool,

    /// OCR 엔드포인트 URL
    #[arg(long)]
    endpoint: Option<String>,

    /// 결과를 클립보드로 복사
    #[arg(long, value_enum)]
    copy: Option<CopyArg>,

    /// 로그 레벨 (trace, debug, info, warn, error)
    #[arg(long, short = 'l', default_value = "info")]
    log_level: String,

    /// 검증과 썸네일만 수행 (전송 안 함)
    #[arg(long)]
    no_send: bool,
}

/// `--copy` 대상
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CopyArg {
    Text,
    Json,
}

impl From<CopyArg> for CopyTarget {
    fn from(arg: CopyArg) -> Self {
        match arg {
            CopyArg::Text => CopyTarget::ResultText,
            CopyArg::Json => CopyTarget::ResultJson,
        }
    }
}

/// 설정 로드: 파일 → 환경변수 → CLI 인자 순으로 덮어쓴다
fn load_config(args: &Args) -> Result<AppConfig> {
    let manager = match &args.config {
        Some(path) => ConfigManager::with_path(path.clone()),
        None => ConfigManager::new(),
    };
    let mut config = match manager {
        Ok(manager) => {
            info!("설정 파일: {:?}", manager.config_path());
            if args.save_key {
                if let Some(key) = &args.api_key {
                    manager
                        .persist_api_key(key)
                        .context("API 키 저장 실패")?;
                }
            }
            manager.get()
        }
        Err(e) if args.save_key => {
            return Err(anyhow!(e).context("설정 파일을 열 수 없어 API 키를 저장하지 못함"));
        }
        Err(e) => {
            warn!("설정 관리자 초기화 실패, 기본 설정 사용: {e}");
            AppConfig::default_config()
        }
    };

    config.apply_env_overrides();
    config.apply_api_key(args.api_key.clone());
    if let Some(endpoint) = &args.endpoint {
        config.ocr_api.endpoint = endpoint.clone();
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let log_filter = format!(
        "imgtext={},imgtext_app={},imgtext_core={},imgtext_vision={},imgtext_network={}",
        args.log_level, args.log_level, args.log_level, args.log_level, args.log_level
    );
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_filter)),
        )
        .init();

    let config = load_config(&args)?;

    let file = validation::load_file(&args.file, config.upload.max_bytes)
        .with_context(|| format!("파일 열기 실패: {}", args.file.display()))?;

    let clipboard = SystemClipboard::probe().map(|c| Arc::new(c) as Arc<dyn Clipboard>);
    let mut controller = UploadController::without_provider(config, clipboard);

    let options = SessionOptions {
        send: !args.no_send,
        copy: args.copy.map(CopyTarget::from),
    };
    let outcome = session::run_session(&mut controller, file, options, session::connect_ninjas)
        .await
        .context("OCR 클라이언트 생성 실패")?;

    let toast = controller.messages().current();
    println!(
        "{}",
        view::render_terminal(&view::render(&controller, toast.as_ref()))
    );

    match outcome {
        SessionOutcome::Rejected => Err(anyhow!("업로드할 수 없는 파일: {}", args.file.display())),
        SessionOutcome::Failed => Err(anyhow!("OCR 요청 실패")),
        SessionOutcome::Validated | SessionOutcome::Succeeded => Ok(()),
    }
}

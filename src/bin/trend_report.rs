use log::{debug, error, info, warn};
use std::env;
use std::path::PathBuf;
use std::process::ExitCode;
use trend_analyzer::{
    AnalyzerConfig, ConfigFormat, ConfigLoader, DEFAULT_CONFIG, RawBar, TrendAnalyzer,
    format_analysis,
};

fn print_usage(program: &str) {
    println!(
        "사용법: {} <종목_코드> <일봉_JSON_파일> [설정_파일_경로] [--json]",
        program
    );
    println!("일봉 JSON 파일은 date/open/high/low/close/volume 필드를 가진 레코드 배열입니다.");
}

fn main() -> ExitCode {
    // 로그 초기화
    env_logger::init();

    info!("추세 보고서 생성 시작");

    let args: Vec<String> = env::args().collect();
    debug!("커맨드 라인 인수: {:?}", args);

    let json_output = args.iter().any(|arg| arg == "--json");
    let positional: Vec<&String> = args.iter().skip(1).filter(|arg| *arg != "--json").collect();

    if positional.len() < 2 {
        error!("인수가 충분하지 않습니다. 종목 코드와 일봉 파일이 필요합니다.");
        print_usage(&args[0]);
        return ExitCode::FAILURE;
    }

    let code = positional[0].as_str();
    let bars_path = PathBuf::from(positional[1]);

    // 설정 파일 (지정되지 않은 경우 기본 설정 사용)
    let config: AnalyzerConfig = match positional.get(2) {
        Some(path) => {
            let config_path = PathBuf::from(path);
            if !config_path.exists() {
                warn!("설정 파일이 존재하지 않습니다: {}", config_path.display());
                println!(
                    "경고: 설정 파일이 존재하지 않습니다: {}",
                    config_path.display()
                );
                return ExitCode::FAILURE;
            }
            match ConfigLoader::load_from_file(&config_path, ConfigFormat::Auto) {
                Ok(config) => config,
                Err(e) => {
                    error!("설정 로드 실패: {}", e);
                    println!("설정 로드 실패: {}", e);
                    return ExitCode::FAILURE;
                }
            }
        }
        None => {
            debug!("기본 설정 사용");
            DEFAULT_CONFIG.clone()
        }
    };

    let content = match std::fs::read_to_string(&bars_path) {
        Ok(content) => content,
        Err(e) => {
            error!("일봉 파일 읽기 실패: {} - {}", bars_path.display(), e);
            println!("일봉 파일 읽기 실패: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let records: Vec<RawBar> = match serde_json::from_str(&content) {
        Ok(records) => records,
        Err(e) => {
            error!("일봉 파일 파싱 실패: {}", e);
            println!("일봉 파일 파싱 실패: {}", e);
            return ExitCode::FAILURE;
        }
    };
    info!("일봉 {}개 로드: {}", records.len(), bars_path.display());

    let analyzer = match TrendAnalyzer::try_new(config) {
        Ok(analyzer) => analyzer,
        Err(e) => {
            println!("설정 오류: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let result = match analyzer.analyze_records(code, records) {
        Ok(result) => result,
        Err(e) => {
            error!("분석 실패: {}", e);
            println!("분석 실패: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if json_output {
        match serde_json::to_string_pretty(&result.to_flat_map()) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                error!("결과 직렬화 실패: {}", e);
                return ExitCode::FAILURE;
            }
        }
    } else {
        println!("{}", format_analysis(&result));
    }

    info!("추세 보고서 생성 완료");
    ExitCode::SUCCESS
}

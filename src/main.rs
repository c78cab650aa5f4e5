use schooldeskd::{api, db};

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

fn data_dir() -> PathBuf {
    std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("SCHOOLDESK_DATA").map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("."))
}

fn main() {
    env_logger::init();

    let dir = data_dir();
    let conn = match db::open_db(&dir) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("failed to open store in {}: {e:?}", dir.display());
            std::process::exit(1);
        }
    };
    let mut state = api::AppState::new(conn);

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(v) => v,
            Err(_) => break,
        };
        if line.trim().is_empty() {
            continue;
        }

        let req: api::Request = match serde_json::from_str(&line) {
            Ok(v) => v,
            Err(e) => {
                // Can't reply with a matching id; report and move on.
                let _ = writeln!(
                    stdout,
                    "{{\"ok\":false,\"error\":{{\"code\":\"bad_json\",\"message\":\"{}\"}}}}",
                    e
                );
                let _ = stdout.flush();
                continue;
            }
        };

        let resp = api::handle_request(&mut state, req);
        let _ = writeln!(
            stdout,
            "{}",
            serde_json::to_string(&resp).unwrap_or_else(|_| "{\"ok\":false}".to_string())
        );
        let _ = stdout.flush();
    }
}

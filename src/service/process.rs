use std::io::{self, Read, Write};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use log::{debug, warn};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

#[derive(Debug)]
pub struct EngineOutput {
    pub status: ExitStatus,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl EngineOutput {
    pub fn stderr_text(&self) -> String {
        String::from_utf8_lossy(&self.stderr).trim().to_string()
    }
}

/// 執行外部程式並收集輸出
///
/// stdin/stdout/stderr 由輔助執行緒處理，避免管線緩衝區塞滿造成互相等待。
/// 超過 `timeout` 時終止子程序並回傳 `ErrorKind::TimedOut`。
/// 逾時後不再等待輔助執行緒：包裝腳本啟動的孫程序可能仍握著管線。
pub fn run_engine(
    command: &mut Command,
    stdin_data: Option<&[u8]>,
    timeout: Option<Duration>,
) -> io::Result<EngineOutput> {
    command
        .stdin(if stdin_data.is_some() { Stdio::piped() } else { Stdio::null() })
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    let mut child = command.spawn()?;

    let writer = match (stdin_data, child.stdin.take()) {
        (Some(data), Some(mut stdin)) => {
            let data = data.to_vec();
            Some(thread::spawn(move || match stdin.write_all(&data) {
                // 引擎不讀取 stdin 就結束時會出現，結果仍以輸出檔為準
                Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(()),
                other => other,
            }))
        }
        _ => None,
    };
    let stdout_reader = spawn_reader(child.stdout.take());
    let stderr_reader = spawn_reader(child.stderr.take());

    let status = match wait_with_timeout(&mut child, timeout) {
        Ok(status) => status,
        Err(e) => {
            debug!("放棄收集子程序輸出：{}", e);
            return Err(e);
        }
    };

    if let Some(writer) = writer {
        match writer.join() {
            Ok(Err(e)) => warn!("寫入引擎 stdin 失敗：{}", e),
            Err(_) => warn!("stdin 寫入執行緒異常結束"),
            Ok(Ok(())) => {}
        }
    }
    let stdout = stdout_reader.join().unwrap_or_default();
    let stderr = stderr_reader.join().unwrap_or_default();

    Ok(EngineOutput {
        status,
        stdout,
        stderr,
    })
}

fn spawn_reader<R: Read + Send + 'static>(pipe: Option<R>) -> JoinHandle<Vec<u8>> {
    thread::spawn(move || {
        let mut buffer = Vec::new();
        if let Some(mut pipe) = pipe {
            let _ = pipe.read_to_end(&mut buffer);
        }
        buffer
    })
}

fn wait_with_timeout(child: &mut Child, timeout: Option<Duration>) -> io::Result<ExitStatus> {
    let Some(limit) = timeout else {
        return child.wait();
    };

    let start = Instant::now();
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(status);
        }
        if start.elapsed() > limit {
            debug!("子程序超過 {:?} 未結束，終止中", limit);
            let _ = child.kill();
            let _ = child.wait();
            return Err(io::Error::new(
                io::ErrorKind::TimedOut,
                format!("子程序執行超過 {} 秒", limit.as_secs_f64()),
            ));
        }
        thread::sleep(POLL_INTERVAL);
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn collects_stdout_and_status() {
        let output = run_engine(Command::new("sh").args(["-c", "echo hello; exit 3"]), None, None).unwrap();
        assert_eq!(output.status.code(), Some(3));
        assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "hello");
    }

    #[test]
    fn pipes_stdin_to_child() {
        let output = run_engine(
            Command::new("sh").args(["-c", "cat"]),
            Some("# 標題".as_bytes()),
            Some(Duration::from_secs(5)),
        )
        .unwrap();
        assert!(output.status.success());
        assert_eq!(String::from_utf8_lossy(&output.stdout), "# 標題");
    }

    #[test]
    fn kills_child_after_timeout() {
        let start = Instant::now();
        let err = run_engine(
            Command::new("sh").args(["-c", "exec sleep 5"]),
            None,
            Some(Duration::from_millis(200)),
        )
        .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::TimedOut);
        assert!(start.elapsed() < Duration::from_secs(4));
    }

    #[test]
    fn timeout_holds_when_grandchild_keeps_pipes_open() {
        let start = Instant::now();
        let err = run_engine(
            Command::new("sh").args(["-c", "sleep 4; echo done"]),
            None,
            Some(Duration::from_millis(200)),
        )
        .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::TimedOut);
        assert!(start.elapsed() < Duration::from_secs(2), "{:?}", start.elapsed());
    }

    #[test]
    fn missing_program_is_spawn_error() {
        let err = run_engine(&mut Command::new("/nonexistent/pandoc-binary"), None, None).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}

//! 执行测试体与断言回调，把 `Err` 返回值和 panic 统一转换为 [`StructuredError`]
use crate::error::{CheckError, ErrorKind, Location, StructuredError};
use regex::Regex;
use std::any::Any;
use std::backtrace::BacktraceStatus;
use std::cell::{Cell, RefCell};
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;
use std::sync::{Once, OnceLock};

thread_local! {
    /// 当前线程嵌套在 `invoke` 中的层数
    static CAPTURE_DEPTH: Cell<usize> = const { Cell::new(0) };
    static LAST_PANIC: RefCell<Option<CapturedPanic>> = const { RefCell::new(None) };
}

static INSTALL_HOOK: Once = Once::new();

struct CapturedPanic {
    message: String,
    location: Option<Location>,
}

struct CaptureScope;

impl CaptureScope {
    fn enter() -> Self {
        CAPTURE_DEPTH.with(|depth| depth.set(depth.get() + 1));
        CaptureScope
    }
}

impl Drop for CaptureScope {
    fn drop(&mut self) {
        CAPTURE_DEPTH.with(|depth| depth.set(depth.get().saturating_sub(1)));
    }
}

/// 执行 `body`，失败时返回结构化错误
///
/// panic 会被捕获且不会打印到 stderr；位置取自 panic 发生处。
pub(crate) fn invoke<F>(body: F) -> Result<(), StructuredError>
where
    F: FnOnce() -> anyhow::Result<()>,
{
    install_hook();
    LAST_PANIC.with(|slot| slot.borrow_mut().take());

    let outcome = {
        let _scope = CaptureScope::enter();
        panic::catch_unwind(AssertUnwindSafe(body))
    };

    match outcome {
        Ok(Ok(())) => Ok(()),
        Ok(Err(err)) => Err(translate(&err)),
        Err(payload) => Err(from_panic(payload)),
    }
}

/// 把测试体返回的错误转换为结构化错误
pub fn translate(err: &anyhow::Error) -> StructuredError {
    if let Some(check_error) = err.downcast_ref::<CheckError>() {
        return StructuredError::from(check_error);
    }
    if let Some(structured) = err.downcast_ref::<StructuredError>() {
        return structured.clone();
    }

    let backtrace = err.backtrace();
    let location = if backtrace.status() == BacktraceStatus::Captured {
        sniff_location(&backtrace.to_string())
    } else {
        None
    };

    StructuredError::new(ErrorKind::Uncaught, err.to_string()).with_location(location)
}

/// 从回溯文本中找出第一个属于调用方代码的 `文件:行号`
pub fn sniff_location(trace: &str) -> Option<Location> {
    static FRAME_REGEX: OnceLock<Regex> = OnceLock::new();
    let re = FRAME_REGEX.get_or_init(|| Regex::new(r"at (\S+):(\d+):\d+").unwrap());

    re.captures_iter(trace).find_map(|caps| {
        let path = &caps[1];
        if is_foreign_frame(path) {
            return None;
        }
        let line = caps[2].parse::<u32>().ok().filter(|line| *line > 0)?;
        Some(Location::new(file_name(path), line))
    })
}

fn is_foreign_frame(path: &str) -> bool {
    const FOREIGN: [&str; 4] = ["/rustc/", "/library/", ".cargo", "/anyhow-"];
    let normalized = path.replace('\\', "/");
    FOREIGN.iter().any(|marker| normalized.contains(marker))
}

fn file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string())
}

fn install_hook() {
    INSTALL_HOOK.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            let capturing = CAPTURE_DEPTH.try_with(Cell::get).unwrap_or(0) > 0;
            if !capturing {
                previous(info);
                return;
            }

            let captured = CapturedPanic {
                message: payload_message(info.payload()),
                location: info
                    .location()
                    .map(|location| Location::new(file_name(location.file()), location.line())),
            };
            let _ = LAST_PANIC.try_with(|slot| *slot.borrow_mut() = Some(captured));
        }));
    });
}

/// 消息总是取自 payload；hook 记录的位置只有在消息一致时才采用
fn from_panic(payload: Box<dyn Any + Send>) -> StructuredError {
    let message = payload_message(payload.as_ref());
    let location = LAST_PANIC
        .with(|slot| slot.borrow_mut().take())
        .filter(|captured| captured.message == message)
        .and_then(|captured| captured.location);

    StructuredError::new(ErrorKind::Uncaught, message).with_location(location)
}

fn payload_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "explicit panic".to_string()
    }
}

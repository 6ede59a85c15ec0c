/// 断言模块 - 对动态值做相等、真值、类型、包含和抛错检查
mod check;
mod messages;
mod value;

pub use check::{Assertion, assert_that};
pub use value::{Callback, Value};

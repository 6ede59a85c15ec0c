use crate::Result;
use crate::assertion::messages;
use crate::assertion::value::{Callback, Value};
use crate::capture;
use crate::error::StructuredError;

/// 包装一个值，返回可链式调用的断言
///
/// ```
/// use checkup::assert_that;
///
/// assert_that(1).equals(1).unwrap();
/// assert!(assert_that("defgh").contains("abc").is_err());
/// ```
pub fn assert_that(actual: impl Into<Value>) -> Assertion {
    Assertion::new(actual.into())
}

/// 对单个值的断言集合，所有检查都不会修改被包装的值
#[derive(Debug, Clone)]
pub struct Assertion {
    actual: Value,
}

impl Assertion {
    pub fn new(actual: Value) -> Self {
        Self { actual }
    }

    pub fn actual(&self) -> &Value {
        &self.actual
    }

    pub fn equals(&self, expected: impl Into<Value>) -> Result<()> {
        let expected = expected.into();
        if !expected.strict_equals(&self.actual) {
            return Err(messages::equals(&expected, &self.actual));
        }
        Ok(())
    }

    pub fn not_equals(&self, expected: impl Into<Value>) -> Result<()> {
        let expected = expected.into();
        if expected.strict_equals(&self.actual) {
            return Err(messages::not_equals(&expected, &self.actual));
        }
        Ok(())
    }

    pub fn is_true(&self) -> Result<()> {
        match self.actual {
            Value::Bool(true) => Ok(()),
            _ => Err(messages::to_be(&self.actual, "true")),
        }
    }

    pub fn is_false(&self) -> Result<()> {
        match self.actual {
            Value::Bool(false) => Ok(()),
            _ => Err(messages::to_be(&self.actual, "false")),
        }
    }

    pub fn is_truthy(&self) -> Result<()> {
        if !self.actual.is_truthy() {
            return Err(messages::to_be(&self.actual, "truthy"));
        }
        Ok(())
    }

    pub fn is_falsy(&self) -> Result<()> {
        if self.actual.is_truthy() {
            return Err(messages::to_be(&self.actual, "falsy"));
        }
        Ok(())
    }

    pub fn is_null(&self) -> Result<()> {
        if !self.actual.is_null() {
            return Err(messages::to_be(&self.actual, "null"));
        }
        Ok(())
    }

    pub fn is_not_null(&self) -> Result<()> {
        if self.actual.is_null() {
            return Err(messages::to_not_be(&self.actual, "null"));
        }
        Ok(())
    }

    pub fn is_undefined(&self) -> Result<()> {
        if !self.actual.is_undefined() {
            return Err(messages::to_be(&self.actual, "undefined"));
        }
        Ok(())
    }

    pub fn is_not_undefined(&self) -> Result<()> {
        if self.actual.is_undefined() {
            return Err(messages::to_not_be(&self.actual, "undefined"));
        }
        Ok(())
    }

    /// 字符串检查子串，数组检查元素
    pub fn contains(&self, included: impl Into<Value>) -> Result<()> {
        let included = included.into();
        if !self.includes(&included)? {
            return Err(messages::contains(&self.actual, &included));
        }
        Ok(())
    }

    pub fn not_contains(&self, included: impl Into<Value>) -> Result<()> {
        let included = included.into();
        if self.includes(&included)? {
            return Err(messages::not_contains(&self.actual, &included));
        }
        Ok(())
    }

    pub fn is_type(&self, expected_type: &str) -> Result<()> {
        if self.actual.type_of() != expected_type {
            return Err(messages::is_type(expected_type, &self.actual));
        }
        Ok(())
    }

    pub fn is_not_type(&self, expected_type: &str) -> Result<()> {
        if self.actual.type_of() == expected_type {
            return Err(messages::is_not_type(expected_type, &self.actual));
        }
        Ok(())
    }

    /// 被包装的回调必须抛出错误
    pub fn fails(&self) -> Result<()> {
        self.fails_finally(|| {})
    }

    /// 同 [`fails`](Self::fails)，回调执行后总会调用一次 `on_finally`
    pub fn fails_finally(&self, on_finally: impl FnOnce()) -> Result<()> {
        let callback = self.callback(None)?;
        let raised = capture::invoke(|| callback());
        on_finally();

        match raised {
            Err(_) => Ok(()),
            Ok(()) => Err(messages::expected_error()),
        }
    }

    /// 回调必须抛出消息与 `expected` 一致的错误
    ///
    /// `expected` 可以是字符串（直接比较消息），也可以是带 `message` 的错误形对象。
    pub fn fails_with_error(&self, expected: impl Into<Value>) -> Result<()> {
        self.fails_with_error_finally(expected, || {})
    }

    pub fn fails_with_error_finally(
        &self,
        expected: impl Into<Value>,
        on_finally: impl FnOnce(),
    ) -> Result<()> {
        let expected = ExpectedError::from_value(expected.into())?;
        let callback = self.callback(expected.name().as_deref())?;
        let raised = capture::invoke(|| callback());
        on_finally();

        match raised {
            Ok(()) => Err(messages::expected_error()),
            Err(err) if !expected.matches(&err) => Err(messages::specific_error(
                err.message(),
                &expected.message_text(),
            )),
            Err(_) => Ok(()),
        }
    }

    /// 回调不得抛出错误
    pub fn succeeds(&self) -> Result<()> {
        self.succeeds_finally(|| {})
    }

    pub fn succeeds_finally(&self, on_finally: impl FnOnce()) -> Result<()> {
        let callback = self.callback(None)?;
        let raised = capture::invoke(|| callback());
        on_finally();

        raised.map_err(|err| messages::no_error(&err.describe()))
    }

    fn includes(&self, included: &Value) -> Result<bool> {
        if !self.actual.is_truthy() {
            return Err(messages::contains_is_null(&self.actual, included));
        }

        match &self.actual {
            Value::String(haystack) => Ok(haystack.contains(&included.to_string())),
            Value::Array(items) => Ok(items.iter().any(|item| item.same_value_zero(included))),
            other => Err(messages::not_a_collection(other, included)),
        }
    }

    fn callback(&self, error_name: Option<&str>) -> Result<Callback> {
        self.actual
            .as_callback()
            .cloned()
            .ok_or_else(|| messages::callback_must_be_function(error_name))
    }
}

/// `fails_with_error` 的期望：消息字符串或错误形对象
enum ExpectedError {
    Message(String),
    Shaped(Value),
}

impl ExpectedError {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::String(message) => Ok(ExpectedError::Message(message)),
            Value::Null | Value::Array(_) | Value::Object(_) => {
                let error_shaped = ["message", "stack", "name"]
                    .iter()
                    .any(|key| value.get(key).is_some_and(Value::is_truthy));
                if !error_shaped {
                    return Err(messages::invalid_error_type("non-error object"));
                }
                Ok(ExpectedError::Shaped(value))
            }
            other => Err(messages::invalid_error_type(other.type_of())),
        }
    }

    fn name(&self) -> Option<String> {
        match self {
            ExpectedError::Message(_) => None,
            ExpectedError::Shaped(value) => value
                .get("name")
                .filter(|name| name.is_truthy())
                .map(|name| name.to_string()),
        }
    }

    fn matches(&self, raised: &StructuredError) -> bool {
        match self {
            ExpectedError::Message(message) => raised.message() == message,
            ExpectedError::Shaped(value) => match value.get("message") {
                Some(Value::String(message)) => raised.message() == message,
                _ => false,
            },
        }
    }

    fn message_text(&self) -> String {
        match self {
            ExpectedError::Message(message) => message.clone(),
            ExpectedError::Shaped(value) => value
                .get("message")
                .cloned()
                .unwrap_or(Value::Undefined)
                .to_string(),
        }
    }
}

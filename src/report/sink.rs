use crate::utils::strip_ansi;
use comfy_table::Table;

/// 报告输出目的地
///
/// 三个通道：普通行、错误行、表格。实现方需保持写入顺序。
pub trait TextSink {
    fn line(&mut self, text: &str);

    fn error_line(&mut self, text: &str);

    fn table(&mut self, table: &Table);
}

impl<T: TextSink + ?Sized> TextSink for &mut T {
    fn line(&mut self, text: &str) {
        (**self).line(text);
    }

    fn error_line(&mut self, text: &str) {
        (**self).error_line(text);
    }

    fn table(&mut self, table: &Table) {
        (**self).table(table);
    }
}

/// 输出到标准输出 / 标准错误
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleSink;

impl TextSink for ConsoleSink {
    fn line(&mut self, text: &str) {
        println!("{}", text);
    }

    fn error_line(&mut self, text: &str) {
        eprintln!("{}", text);
    }

    fn table(&mut self, table: &Table) {
        println!("{}", table);
    }
}

/// 收集到内存中的输出
#[derive(Debug, Default, Clone)]
pub struct BufferSink {
    lines: Vec<String>,
    errors: Vec<String>,
}

impl BufferSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// 普通通道与表格通道的每次写入
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// 普通通道的全部输出（保留颜色）
    pub fn output(&self) -> String {
        self.lines.join("\n")
    }

    /// 去除颜色后的全部输出
    pub fn plain_output(&self) -> String {
        strip_ansi(&self.output())
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty() && self.errors.is_empty()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
        self.errors.clear();
    }
}

impl TextSink for BufferSink {
    fn line(&mut self, text: &str) {
        self.lines.push(text.to_string());
    }

    fn error_line(&mut self, text: &str) {
        self.errors.push(text.to_string());
    }

    fn table(&mut self, table: &Table) {
        self.lines.push(table.to_string());
    }
}

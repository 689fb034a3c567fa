//! 十六进制转储
//!
//! 把一段字节按固定列数排版为多行文本，每行可带前缀、偏移或地址，
//! 末尾可附加可打印 ASCII 列：
//!
//! ```text
//! ioctl: 00000000: 48 65 6c 6c 6f 00          | Hello.
//! ```

use alloc::string::String;
use core::fmt::{self, Write};

/// 默认列数
pub const DEFAULT_COLUMNS: usize = 16;

/// 每行行首的定位信息
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DumpPrefix {
    /// 不输出定位信息
    #[default]
    None,
    /// 输出相对缓冲区起点的偏移（8 位十六进制）
    Offset,
    /// 输出该行首字节的内存地址
    Address,
}

/// 十六进制转储的格式描述
///
/// 实现了 [`fmt::Display`]，每行以换行符结尾；[`HexDump::lines`] 则逐行产出
/// 不带换行符的字符串，适合交给 [`crate::DiagSink`]。
#[derive(Debug, Clone, Copy)]
pub struct HexDump<'a> {
    data: &'a [u8],
    prefix_type: DumpPrefix,
    prefix: Option<&'a str>,
    columns: usize,
    ascii: bool,
}

impl<'a> HexDump<'a> {
    /// 以默认格式（16 列、无定位、带 ASCII 列）描述 `data`
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            prefix_type: DumpPrefix::None,
            prefix: None,
            columns: DEFAULT_COLUMNS,
            ascii: true,
        }
    }

    /// 设置行首定位信息
    pub fn prefix_type(mut self, prefix_type: DumpPrefix) -> Self {
        self.prefix_type = prefix_type;
        self
    }

    /// 设置每行最前面的固定前缀
    pub fn prefix(mut self, prefix: &'a str) -> Self {
        self.prefix = Some(prefix);
        self
    }

    /// 设置每行字节数（0 视为 1）
    pub fn columns(mut self, columns: usize) -> Self {
        self.columns = columns.max(1);
        self
    }

    /// 是否附加 ASCII 列
    ///
    /// 十六进制区与 ASCII 列之间的 ` | ` 分隔符只在打开 ASCII 列时输出；
    /// 关闭时行尾就是最后一个字节（或补齐列宽的空格），不带分隔符。
    pub fn ascii(mut self, ascii: bool) -> Self {
        self.ascii = ascii;
        self
    }

    /// 转储的总行数
    pub fn line_count(&self) -> usize {
        self.data.len().div_ceil(self.columns)
    }

    /// 逐行产出（不含换行符）
    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        (0..self.line_count()).map(move |row| {
            let mut line = String::new();
            // 写入 String 不会失败
            let _ = self.write_row(&mut line, row * self.columns);
            line
        })
    }

    fn write_row<W: Write>(&self, out: &mut W, start: usize) -> fmt::Result {
        let end = (start + self.columns).min(self.data.len());
        let row = &self.data[start..end];

        if let Some(prefix) = self.prefix {
            out.write_str(prefix)?;
        }

        match self.prefix_type {
            DumpPrefix::None => {}
            DumpPrefix::Offset => write!(out, "{:08x}: ", start)?,
            DumpPrefix::Address => write!(out, "{:p}: ", self.data.as_ptr().wrapping_add(start))?,
        }

        for (i, byte) in row.iter().enumerate() {
            if i > 0 {
                out.write_char(' ')?;
            }
            write!(out, "{:02x}", byte)?;
        }
        for _ in row.len()..self.columns {
            out.write_str("   ")?;
        }

        if self.ascii {
            out.write_str(" | ")?;
            for &byte in row {
                let ch = if byte.is_ascii_graphic() || byte == b' ' {
                    byte as char
                } else {
                    '.'
                };
                out.write_char(ch)?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for HexDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.line_count() {
            self.write_row(f, row * self.columns)?;
            f.write_char('\n')?;
        }
        Ok(())
    }
}

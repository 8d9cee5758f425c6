//! A minimal streaming XML writer.
//!
//! Output layout:
//! - the declaration is followed directly by the root element, with no
//!   newline between them;
//! - each start tag goes on its own line, indented two spaces per level;
//! - an element without child elements closes on the line it opened on,
//!   and empty elements are written as `<a></a>`, never `<a/>`;
//! - body text is written as CDATA.

use std::borrow::Cow;
use std::io::{self, Write};

const DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;
const INDENT: &str = "  ";
const CDATA_START: &str = "<![CDATA[";
const CDATA_END: &str = "]]>";
const CDATA_ESCAPE: &str = "]]]]><![CDATA[>";

pub struct XmlWriter<W: Write> {
    out: W,
    depth: usize,
    /// Set after a start tag; cleared once a child element is opened.
    indented_in: bool,
    put_newline: bool,
}

impl<W: Write> XmlWriter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            depth: 0,
            indented_in: false,
            put_newline: false,
        }
    }

    pub fn declaration(&mut self) -> io::Result<()> {
        self.out.write_all(DECLARATION.as_bytes())
    }

    pub fn start(&mut self, name: &str, attrs: &[(&str, &str)]) -> io::Result<()> {
        self.open_line()?;
        write!(self.out, "<{name}")?;
        for (key, value) in attrs {
            write!(self.out, " {key}=\"{}\"", escape(value))?;
        }
        self.out.write_all(b">")
    }

    pub fn end(&mut self, name: &str) -> io::Result<()> {
        self.close_line()?;
        write!(self.out, "</{name}>")
    }

    /// Writes `text` as literal character data. Empty text writes nothing.
    /// Characters that XML cannot carry become U+FFFD.
    pub fn cdata(&mut self, text: &str) -> io::Result<()> {
        if text.is_empty() {
            return Ok(());
        }
        self.out.write_all(CDATA_START.as_bytes())?;
        let mut rest = text;
        while let Some((before, after)) = rest.split_once(CDATA_END) {
            self.out.write_all(replace_invalid(before).as_bytes())?;
            self.out.write_all(CDATA_ESCAPE.as_bytes())?;
            rest = after;
        }
        self.out.write_all(replace_invalid(rest).as_bytes())?;
        self.out.write_all(CDATA_END.as_bytes())
    }

    /// Writes a complete element holding only a text body.
    pub fn text_element(
        &mut self,
        name: &str,
        attrs: &[(&str, &str)],
        body: &str,
    ) -> io::Result<()> {
        self.start(name, attrs)?;
        self.cdata(body)?;
        self.end(name)
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn open_line(&mut self) -> io::Result<()> {
        self.newline_and_indent()?;
        self.depth += 1;
        self.indented_in = true;
        Ok(())
    }

    fn close_line(&mut self) -> io::Result<()> {
        self.depth = self.depth.saturating_sub(1);
        if self.indented_in {
            self.indented_in = false;
            return Ok(());
        }
        self.newline_and_indent()
    }

    fn newline_and_indent(&mut self) -> io::Result<()> {
        if self.put_newline {
            self.out.write_all(b"\n")?;
        } else {
            self.put_newline = true;
        }
        for _ in 0..self.depth {
            self.out.write_all(INDENT.as_bytes())?;
        }
        Ok(())
    }
}

/// Escapes a string for use inside a double-quoted attribute value.
pub fn escape(value: &str) -> Cow<'_, str> {
    if !value.chars().any(needs_escape) {
        return Cow::Borrowed(value);
    }
    let mut out = String::with_capacity(value.len() + 8);
    for c in value.chars() {
        match c {
            '"' => out.push_str("&#34;"),
            '\'' => out.push_str("&#39;"),
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\t' => out.push_str("&#x9;"),
            '\n' => out.push_str("&#xA;"),
            '\r' => out.push_str("&#xD;"),
            c if !is_xml_char(c) => out.push('\u{FFFD}'),
            c => out.push(c),
        }
    }
    Cow::Owned(out)
}

fn replace_invalid(text: &str) -> Cow<'_, str> {
    if text.chars().all(is_xml_char) {
        return Cow::Borrowed(text);
    }
    Cow::Owned(
        text.chars()
            .map(|c| if is_xml_char(c) { c } else { '\u{FFFD}' })
            .collect(),
    )
}

fn needs_escape(c: char) -> bool {
    matches!(c, '"' | '\'' | '&' | '<' | '>' | '\t' | '\n' | '\r') || !is_xml_char(c)
}

fn is_xml_char(c: char) -> bool {
    matches!(c,
        '\u{9}' | '\u{A}' | '\u{D}'
        | '\u{20}'..='\u{D7FF}'
        | '\u{E000}'..='\u{FFFD}'
        | '\u{10000}'..='\u{10FFFF}')
}

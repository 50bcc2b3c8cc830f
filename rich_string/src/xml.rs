// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! XML serialization of rich strings.
//!
//! A string is written as a `<Str>` element (or `<AStr ws="...">` for one
//! alternative of a multilingual string) holding one `<Run>` per run of its
//! [`NormalizationForm::Nfsc`] form. Run props become attributes.

use alloc::string::String;
use core::fmt::{self, Write};

use text_props::{IntProp, IntPropId, PropVariant, StrPropId, TextProps, WritingSystem};

use crate::{NormalizationForm, RichString, WriteXmlError};

/// Maps writing systems to the identifiers written in XML.
pub trait WritingSystemNames {
    /// Returns the identifier of `ws`, such as `"en"`, if it is known.
    fn identifier(&self, ws: WritingSystem) -> Option<&str>;
}

impl<S: AsRef<str>> WritingSystemNames for [(WritingSystem, S)] {
    fn identifier(&self, ws: WritingSystem) -> Option<&str> {
        self.iter()
            .find(|(id, _)| *id == ws)
            .map(|(_, name)| name.as_ref())
    }
}

impl<S: AsRef<str>, const N: usize> WritingSystemNames for [(WritingSystem, S); N] {
    fn identifier(&self, ws: WritingSystem) -> Option<&str> {
        self.as_slice().identifier(ws)
    }
}

/// Options for [`RichString::write_xml`].
#[derive(Clone, Debug, Default)]
pub struct XmlOptions {
    /// Number of spaces before the wrapper element. Runs get two more.
    pub indent: usize,
    /// Writes an `<AStr>` alternative for this writing system instead of a
    /// plain `<Str>`.
    pub ws: Option<WritingSystem>,
    /// Whether to write the embedded-object data property.
    pub write_obj_data: bool,
}

impl RichString {
    /// Writes the XML representation of this string to `out`.
    ///
    /// Every line, the last one included, ends with a newline.
    pub fn write_xml<W: Write, N: WritingSystemNames + ?Sized>(
        &self,
        out: &mut W,
        names: &N,
        options: &XmlOptions,
    ) -> Result<(), WriteXmlError> {
        let string = self.normalized(NormalizationForm::Nfsc);
        let indent = options.indent;
        let tag = match options.ws {
            Some(ws) => {
                let id = ws_identifier(names, ws)?;
                writeln!(out, "{:indent$}<AStr ws=\"{}\">", "", Escaped(id))?;
                "AStr"
            }
            None => {
                writeln!(out, "{:indent$}<Str>", "")?;
                "Str"
            }
        };
        for run in string.runs() {
            write!(out, "{:1$}<Run", "", indent + 2)?;
            write_props(out, run.props, names, options)?;
            let text = &string.as_str()[run.range];
            writeln!(out, ">{}</Run>", Escaped(text))?;
        }
        writeln!(out, "{:indent$}</{tag}>", "")?;
        Ok(())
    }

    /// Returns the XML representation of this string.
    ///
    /// See [`RichString::write_xml`].
    pub fn to_xml<N: WritingSystemNames + ?Sized>(
        &self,
        names: &N,
        options: &XmlOptions,
    ) -> Result<String, WriteXmlError> {
        let mut out = String::new();
        self.write_xml(&mut out, names, options)?;
        Ok(out)
    }
}

fn ws_identifier<N: WritingSystemNames + ?Sized>(
    names: &N,
    ws: WritingSystem,
) -> Result<&str, WriteXmlError> {
    names
        .identifier(ws)
        .ok_or(WriteXmlError::UnknownWritingSystem(ws))
}

fn write_props<W: Write, N: WritingSystemNames + ?Sized>(
    out: &mut W,
    props: &TextProps,
    names: &N,
    options: &XmlOptions,
) -> Result<(), WriteXmlError> {
    for (id, prop) in props.int_props() {
        match id {
            IntPropId::WS => {
                let id = ws_identifier(names, WritingSystem(prop.value))?;
                write!(out, " ws=\"{}\"", Escaped(id))?;
            }
            IntPropId::ITALIC => write_enum(out, "italic", prop.value, &TOGGLE)?,
            IntPropId::BOLD => write_enum(out, "bold", prop.value, &TOGGLE)?,
            IntPropId::SUPERSCRIPT => write_enum(out, "superscript", prop.value, &SUPERSCRIPT)?,
            IntPropId::UNDERLINE => write_enum(out, "underline", prop.value, &UNDERLINE)?,
            IntPropId::FONT_SIZE => write_measure(out, "fontsize", prop)?,
            IntPropId::OFFSET => write_measure(out, "offset", prop)?,
            IntPropId::FORE_COLOR => write_color(out, "forecolor", prop.value)?,
            IntPropId::BACK_COLOR => write_color(out, "backcolor", prop.value)?,
            IntPropId::UNDER_COLOR => write_color(out, "undercolor", prop.value)?,
            _ => log::debug!("skipping integer property {} in XML output", id.0),
        }
    }
    for (id, value) in props.str_props() {
        let name = match id {
            StrPropId::FONT_FAMILY => "fontFamily",
            StrPropId::OBJ_DATA if options.write_obj_data => "objData",
            StrPropId::OBJ_DATA => continue,
            StrPropId::NAMED_STYLE => "namedStyle",
            _ => {
                log::debug!("skipping string property {} in XML output", id.0);
                continue;
            }
        };
        write!(out, " {name}=\"{}\"", Escaped(value))?;
    }
    Ok(())
}

const TOGGLE: [&str; 3] = ["off", "on", "invert"];
const SUPERSCRIPT: [&str; 3] = ["off", "super", "sub"];
const UNDERLINE: [&str; 7] = [
    "none",
    "dotted",
    "dashed",
    "single",
    "double",
    "strikethrough",
    "squiggle",
];

/// Writes the name of an enumerated value, or the raw number if it has none.
fn write_enum<W: Write>(out: &mut W, attr: &str, value: i32, names: &[&str]) -> fmt::Result {
    match usize::try_from(value).ok().and_then(|ix| names.get(ix)) {
        Some(name) => write!(out, " {attr}=\"{name}\""),
        None => write!(out, " {attr}=\"{value}\""),
    }
}

fn write_measure<W: Write>(out: &mut W, attr: &str, prop: IntProp) -> fmt::Result {
    let unit = match prop.variant {
        PropVariant::Relative => "rel",
        _ => "mpt",
    };
    write!(out, " {attr}=\"{}\" {attr}Unit=\"{unit}\"", prop.value)
}

/// Value of a color property meaning "no color".
const TRANSPARENT: u32 = 0xC000_0000;

/// Writes a `0x00bbggrr` color as `rrggbb`.
fn write_color<W: Write>(out: &mut W, attr: &str, value: i32) -> fmt::Result {
    let value = value.cast_unsigned();
    if value == TRANSPARENT {
        return write!(out, " {attr}=\"transparent\"");
    }
    let [red, green, blue, _] = value.to_le_bytes();
    write!(out, " {attr}=\"{red:02x}{green:02x}{blue:02x}\"")
}

/// Displays text with XML markup characters escaped.
///
/// Tab, line feed and carriage return are written as character references so
/// that attribute value normalization keeps them. The other C0 controls may
/// not appear in XML 1.0 at all, not even as references, and are written as
/// their Control Pictures (U+2400 block) instead. The noncharacters U+FFFE
/// and U+FFFF become U+FFFD.
struct Escaped<'a>(&'a str);

impl fmt::Display for Escaped<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = self.0;
        let mut last = 0;
        for (ix, ch) in text.char_indices() {
            if !matches!(ch, '&' | '<' | '>' | '"' | '\0'..='\u{1F}' | '\u{FFFE}' | '\u{FFFF}') {
                continue;
            }
            f.write_str(&text[last..ix])?;
            last = ix + ch.len_utf8();
            match ch {
                '&' => f.write_str("&amp;")?,
                '<' => f.write_str("&lt;")?,
                '>' => f.write_str("&gt;")?,
                '"' => f.write_str("&quot;")?,
                '\t' | '\n' | '\r' => write!(f, "&#{};", u32::from(ch))?,
                '\0'..='\u{1F}' => f.write_char(control_picture(ch))?,
                _ => f.write_char(char::REPLACEMENT_CHARACTER)?,
            }
        }
        f.write_str(&text[last..])
    }
}

/// Returns the visible stand-in for a C0 control character.
fn control_picture(ch: char) -> char {
    char::from_u32(0x2400 + u32::from(ch)).unwrap_or(char::REPLACEMENT_CHARACTER)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use crate::RichStringBuilder;
    use text_props::PropsFactory;

    const EN: WritingSystem = WritingSystem(1);
    const FR: WritingSystem = WritingSystem(2);
    const NAMES: [(WritingSystem, &str); 2] = [(EN, "en"), (FR, "fr")];

    #[test]
    fn single_run() {
        let factory = PropsFactory::new();
        let s = RichString::new("This is a test!", factory.ws_props(EN));
        let xml = s.to_xml(&NAMES, &XmlOptions::default()).unwrap();
        assert_eq!(xml, "<Str>\n  <Run ws=\"en\">This is a test!</Run>\n</Str>\n");
    }

    #[test]
    fn alternative_with_indent() {
        let factory = PropsFactory::new();
        let s = RichString::new("Bonjour", factory.ws_props(FR));
        let options = XmlOptions {
            indent: 4,
            ws: Some(FR),
            ..XmlOptions::default()
        };
        let xml = s.to_xml(&NAMES, &options).unwrap();
        assert_eq!(
            xml,
            "    <AStr ws=\"fr\">\n      <Run ws=\"fr\">Bonjour</Run>\n    </AStr>\n"
        );
    }

    #[test]
    fn empty_string_keeps_its_run() {
        let factory = PropsFactory::new();
        let s = RichString::empty(factory.ws_props(EN));
        let xml = s.to_xml(&NAMES, &XmlOptions::default()).unwrap();
        assert_eq!(xml, "<Str>\n  <Run ws=\"en\"></Run>\n</Str>\n");
    }

    #[test]
    fn int_props_as_attributes() {
        let factory = PropsFactory::new();
        let mut builder = RichStringBuilder::new(factory.clone(), factory.ws_props(EN));
        builder.append("x", None);
        builder
            .set_int_prop_values(0..1, IntPropId::BOLD, PropVariant::Enum, 1)
            .unwrap();
        builder
            .set_int_prop_values(0..1, IntPropId::UNDERLINE, PropVariant::Enum, 4)
            .unwrap();
        builder
            .set_int_prop_values(0..1, IntPropId::FONT_SIZE, PropVariant::MilliPoint, 12000)
            .unwrap();
        builder
            .set_int_prop_values(0..1, IntPropId::FORE_COLOR, PropVariant::Default, 0x00FF_8000)
            .unwrap();
        builder
            .set_int_prop_values(0..1, IntPropId::BACK_COLOR, PropVariant::Default, -0x4000_0000)
            .unwrap();
        let xml = builder
            .string()
            .to_xml(&NAMES, &XmlOptions::default())
            .unwrap();
        assert_eq!(
            xml,
            "<Str>\n  <Run ws=\"en\" bold=\"on\" underline=\"double\" fontsize=\"12000\" \
             fontsizeUnit=\"mpt\" forecolor=\"0080ff\" backcolor=\"transparent\">x</Run>\n</Str>\n"
        );
    }

    #[test]
    fn str_props_and_obj_data() {
        let factory = PropsFactory::new();
        let mut builder = RichStringBuilder::new(factory.clone(), factory.ws_props(EN));
        builder.append("link", None);
        builder
            .set_str_prop_value(0..4, StrPropId::NAMED_STYLE, "Hyperlink")
            .unwrap();
        builder
            .set_str_prop_value(0..4, StrPropId::OBJ_DATA, "\u{4}https://example.org")
            .unwrap();
        let s = builder.string();

        let plain = s.to_xml(&NAMES, &XmlOptions::default()).unwrap();
        assert!(plain.contains("<Run ws=\"en\" namedStyle=\"Hyperlink\">link</Run>"));

        let options = XmlOptions {
            write_obj_data: true,
            ..XmlOptions::default()
        };
        let full = s.to_xml(&NAMES, &options).unwrap();
        assert!(full.contains(
            "<Run ws=\"en\" objData=\"\u{2404}https://example.org\" namedStyle=\"Hyperlink\">"
        ));
    }

    #[test]
    fn text_is_escaped() {
        let factory = PropsFactory::new();
        let s = RichString::new("a < b && \"c\" > d", factory.ws_props(EN));
        let xml = s.to_xml(&NAMES, &XmlOptions::default()).unwrap();
        assert!(xml.contains(">a &lt; b &amp;&amp; &quot;c&quot; &gt; d</Run>"));
    }

    #[test]
    fn controls_are_escaped_or_replaced() {
        let escaped = Escaped("a\tb\nc\rd\u{0}e\u{1B}f\u{FFFF}g").to_string();
        assert_eq!(escaped, "a&#9;b&#10;c&#13;d\u{2400}e\u{241B}f\u{FFFD}g");
    }

    #[test]
    fn writes_run_safe_form() {
        let factory = PropsFactory::new();
        let mut builder = RichStringBuilder::new(factory.clone(), factory.ws_props(EN));
        builder.append("e\u{0301}A", None);
        builder.append("\u{0308}", Some(&factory.ws_props(FR)));
        let xml = builder
            .string()
            .to_xml(&NAMES, &XmlOptions::default())
            .unwrap();
        assert_eq!(
            xml,
            "<Str>\n  <Run ws=\"en\">\u{00E9}A</Run>\n  <Run ws=\"fr\">\u{0308}</Run>\n</Str>\n"
        );
    }

    #[test]
    fn unknown_writing_system() {
        let factory = PropsFactory::new();
        let s = RichString::new("?", factory.ws_props(WritingSystem(99)));
        assert_eq!(
            s.to_xml(&NAMES, &XmlOptions::default()),
            Err(WriteXmlError::UnknownWritingSystem(WritingSystem(99)))
        );
    }
}

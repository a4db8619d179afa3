//! Reader for `Bldfile` build descriptors.
//!
//! A descriptor is a flat list of `key = value` lines. A `prog`, `dynlib`
//! or `statlib` line opens a target, and the attribute lines that follow
//! it (`dir`, `file`, `libraries`, `option`) apply to that target until the
//! next one is opened.
//!
//! ```text
//! # Bldfile
//! dynlib = kafka
//! dir = src
//! file = kafkaproducer.cxx; kafkaconsumer.cxx
//! libraries = rdkafka++
//! option = -std=c++17; -Wall
//!
//! prog = producer
//! file = example_producer.cpp
//! libraries = kafka
//! ```

use log::warn;

use crate::error::ParseError;
use crate::target::{BuildDescriptor, ParseWarning, TargetKind, WarningKind};

const LIST_SEP: char = ';';

pub fn parse_descriptor(content: &str) -> BuildDescriptor {
    DescriptorParser::new(content).parse()
}

/// Parses raw descriptor bytes, which must be UTF-8.
pub fn parse_descriptor_bytes(content: &[u8]) -> Result<BuildDescriptor, ParseError> {
    match core::str::from_utf8(content) {
        Ok(content) => Ok(parse_descriptor(content)),
        Err(e) => {
            let valid = &content[..e.valid_up_to()];
            let line = valid.iter().filter(|&&b| b == b'\n').count() + 1;
            Err(ParseError::InvalidUtf8 { line })
        }
    }
}

struct DescriptorParser<'a> {
    content: &'a str,
    descriptor: BuildDescriptor,
    current: Option<usize>,
}

impl<'a> DescriptorParser<'a> {
    fn new(content: &'a str) -> Self {
        Self {
            content,
            descriptor: BuildDescriptor::new(),
            current: None,
        }
    }

    fn parse(mut self) -> BuildDescriptor {
        for (idx, line) in self.content.lines().enumerate() {
            let line = line.trim();

            // Skip comments and empty lines
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            // Lines without an assignment carry nothing
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };

            self.parse_assignment(idx + 1, key.trim(), value.trim());
        }

        self.descriptor
    }

    fn parse_assignment(&mut self, line: usize, key: &str, value: &str) {
        let Some(attribute) = Attribute::from_key(key) else {
            match key.parse::<TargetKind>() {
                Ok(kind) => self.open_target(line, kind, value),
                Err(_) => self.warn(line, WarningKind::UnknownKey { key: key.into() }),
            }
            return;
        };

        let Some(idx) = self.current else {
            self.warn(
                line,
                WarningKind::OrphanAttribute {
                    key: key.into(),
                    value: value.into(),
                },
            );
            return;
        };

        let target = self.descriptor.target_mut(idx);
        match attribute {
            Attribute::Dir => target.source_dir = (!value.is_empty()).then(|| value.into()),
            Attribute::File => target.files = split_list(value),
            Attribute::Libraries => target.libraries = split_list(value),
            Attribute::Option => {
                let options = split_list(value).join(" ");
                target.options = (!options.is_empty()).then_some(options);
            }
        }
    }

    fn open_target(&mut self, line: usize, kind: TargetKind, name: &str) {
        if name.is_empty() {
            // Attributes up to the next declaration have no owner
            self.current = None;
            self.warn(line, WarningKind::NamelessTarget { kind });
            return;
        }
        self.current = Some(self.descriptor.declare(name, kind));
    }

    fn warn(&mut self, line: usize, kind: WarningKind) {
        let warning = ParseWarning { line, kind };
        warn!("{warning}");
        self.descriptor.warn(warning);
    }
}

enum Attribute {
    Dir,
    File,
    Libraries,
    Option,
}

impl Attribute {
    fn from_key(key: &str) -> Option<Self> {
        match key {
            "dir" => Some(Attribute::Dir),
            "file" => Some(Attribute::File),
            "libraries" => Some(Attribute::Libraries),
            "option" => Some(Attribute::Option),
            _ => None,
        }
    }
}

/// Splits a `;` separated value, trimming each element and dropping empty ones.
fn split_list(value: &str) -> Vec<String> {
    value
        .split(LIST_SEP)
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(String::from)
        .collect()
}

//! Source map generation for concatenated bundles.
//!
//! Development builds ship a standard v3 source map alongside the
//! concatenated script bundle. Concatenation only moves whole lines, so
//! every output line maps to column 0 of the corresponding input line.

use serde::Serialize;

const BASE64_CHARS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

/// Serialized v3 source map.
#[derive(Debug, Serialize)]
struct SourceMapV3<'a> {
    version: u8,
    file: &'a str,
    sources: &'a [String],
    #[serde(rename = "sourcesContent")]
    sources_content: &'a [String],
    names: [&'a str; 0],
    mappings: String,
}

/// Builds a line-to-line source map while sources are appended.
#[derive(Debug, Default)]
pub struct ConcatSourceMap {
    sources: Vec<String>,
    contents: Vec<String>,
}

impl ConcatSourceMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one input file appended to the bundle.
    pub fn add_source(&mut self, name: impl Into<String>, content: impl Into<String>) {
        self.sources.push(name.into());
        self.contents.push(content.into());
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Render the map as JSON for the given output file name.
    pub fn to_json(&self, file: &str) -> String {
        let map = SourceMapV3 {
            version: 3,
            file,
            sources: &self.sources,
            sources_content: &self.contents,
            names: [],
            mappings: self.mappings(),
        };
        serde_json::to_string(&map).expect("source map serialization cannot fail")
    }

    /// One segment per output line: column 0, source index and source
    /// line relative to the previous segment, source column 0.
    fn mappings(&self) -> String {
        let mut out = String::new();
        let mut prev_source: i64 = 0;
        let mut prev_line: i64 = 0;
        let mut first = true;

        for (index, content) in self.contents.iter().enumerate() {
            // An empty source adds nothing to the bundle, so it gets
            // no mapping lines either
            let lines = content.lines().count() as i64;
            for line in 0..lines {
                if !first {
                    out.push(';');
                }
                encode_vlq(&mut out, 0);
                encode_vlq(&mut out, index as i64 - prev_source);
                encode_vlq(&mut out, line - prev_line);
                encode_vlq(&mut out, 0);
                prev_source = index as i64;
                prev_line = line;
                first = false;
            }
        }

        out
    }
}

/// Base64 VLQ encoding as used by v3 source maps.
fn encode_vlq(out: &mut String, value: i64) {
    let mut vlq = if value < 0 {
        (((-value) as u64) << 1) | 1
    } else {
        (value as u64) << 1
    };

    loop {
        let mut digit = (vlq & 0b11111) as usize;
        vlq >>= 5;
        if vlq > 0 {
            digit |= 0b100000;
        }
        out.push(BASE64_CHARS[digit] as char);
        if vlq == 0 {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vlq(value: i64) -> String {
        let mut s = String::new();
        encode_vlq(&mut s, value);
        s
    }

    #[test]
    fn test_vlq_known_values() {
        assert_eq!(vlq(0), "A");
        assert_eq!(vlq(1), "C");
        assert_eq!(vlq(-1), "D");
        assert_eq!(vlq(16), "gB");
        assert_eq!(vlq(-16), "hB");
    }

    #[test]
    fn test_single_source_mappings() {
        let mut map = ConcatSourceMap::new();
        map.add_source("a.js", "one\ntwo\nthree");
        // Line 0 maps to a.js:0, then each line advances the source line
        assert_eq!(map.mappings(), "AAAA;AACA;AACA");
    }

    #[test]
    fn test_two_sources_reset_line() {
        let mut map = ConcatSourceMap::new();
        map.add_source("a.js", "one\ntwo");
        map.add_source("b.js", "uno");
        // Third segment switches to source 1 and rewinds the line delta
        assert_eq!(map.mappings(), "AAAA;AACA;ACDA");
    }

    #[test]
    fn test_json_shape() {
        let mut map = ConcatSourceMap::new();
        map.add_source("src/assets/js/app.js", "console.log(1);");
        let json = map.to_json("js.js");

        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["version"], 3);
        assert_eq!(parsed["file"], "js.js");
        assert_eq!(parsed["sources"][0], "src/assets/js/app.js");
        assert_eq!(parsed["sourcesContent"][0], "console.log(1);");
        assert!(parsed["mappings"].as_str().unwrap().starts_with("AAAA"));
    }

    #[test]
    fn test_empty_source_contributes_no_lines() {
        let mut map = ConcatSourceMap::new();
        map.add_source("empty.js", "");
        map.add_source("b.js", "x");
        // Single segment: output line 0 maps to source index 1, line 0
        assert_eq!(map.mappings(), "ACAA");
    }

    #[test]
    fn test_source_after_empty_file_stays_aligned() {
        let mut map = ConcatSourceMap::new();
        map.add_source("a.js", "one\ntwo");
        map.add_source("empty.js", "");
        map.add_source("c.js", "tres");
        // Bundle line 2 maps straight to c.js:0; empty.js shifts nothing
        assert_eq!(map.mappings(), "AAAA;AACA;AEDA");
    }
}

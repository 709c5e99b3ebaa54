//! go-import meta tag scanning
//!
//! Finds the first `<meta name="go-import" content="...">` declaration in a
//! markup stream and returns its whitespace-separated content fields:
//! `[import-prefix, vcs, repo-url, ...]`.

use html5ever::tendril::StrTendril;
use html5ever::tokenizer::states::RawKind;
use html5ever::tokenizer::{
    BufferQueue, Tag, TagKind, Token, TokenSink, TokenSinkResult, Tokenizer, TokenizerOpts,
    TokenizerResult,
};
use std::cell::RefCell;
use std::io::{self, Read};
use thiserror::Error;
use tracing::debug;

const GO_IMPORT: &str = "go-import";

const READ_CHUNK: usize = 8 * 1024;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ScanError {
    #[error("unable to find go-import meta tag")]
    TagNotFound,
}

/// Token sink that watches start tags for the go-import declaration
#[derive(Default)]
struct GoImportSink {
    fields: RefCell<Option<Vec<String>>>,
}

impl TokenSink for GoImportSink {
    type Handle = ();

    fn process_token(&self, token: Token, _line_number: u64) -> TokenSinkResult<()> {
        let Token::TagToken(tag) = token else {
            return TokenSinkResult::Continue;
        };
        if tag.kind != TagKind::StartTag {
            return TokenSinkResult::Continue;
        }

        if let Some(fields) = go_import_fields(&tag) {
            *self.fields.borrow_mut() = Some(fields);
            // Suspends the tokenizer; nothing after this tag is looked at
            return TokenSinkResult::Script(());
        }

        // Without a tree builder the sink decides where raw text starts
        match &*tag.name {
            "script" => TokenSinkResult::RawData(RawKind::ScriptData),
            "style" | "xmp" | "iframe" | "noembed" | "noframes" | "noscript" => {
                TokenSinkResult::RawData(RawKind::Rawtext)
            }
            "textarea" | "title" => TokenSinkResult::RawData(RawKind::Rcdata),
            "plaintext" => TokenSinkResult::Plaintext,
            _ => TokenSinkResult::Continue,
        }
    }
}

/// Content fields of a `<meta name="go-import" content="...">` start tag
///
/// Attributes are read in order and a later `content` replaces an earlier
/// one. The tokenizer has already dropped repeated attribute names, keeping
/// the first, so in practice each attribute is seen once.
fn go_import_fields(tag: &Tag) -> Option<Vec<String>> {
    if &*tag.name != "meta" {
        return None;
    }

    let mut is_go_import = false;
    let mut fields: Vec<String> = Vec::new();
    for attr in &tag.attrs {
        match &*attr.name.local {
            "name" if &*attr.value == GO_IMPORT => is_go_import = true,
            "content" => fields = attr.value.split_whitespace().map(str::to_string).collect(),
            _ => {}
        }
    }

    (is_go_import && !fields.is_empty()).then_some(fields)
}

/// Scan markup for the first qualifying go-import meta tag
///
/// The reader is tokenized chunk by chunk and scanning stops at the first
/// start tag that qualifies; the rest of the stream is never read. A read
/// failure ends the input like end-of-stream does. Malformed or truncated
/// markup is never an error of its own, it simply yields `TagNotFound` when
/// no complete tag qualifies.
pub fn scan_for_discovery_tag<R: Read>(mut reader: R) -> Result<Vec<String>, ScanError> {
    let tokenizer = Tokenizer::new(GoImportSink::default(), TokenizerOpts::default());
    let input = BufferQueue::default();
    let mut pending: Vec<u8> = Vec::new();
    let mut chunk = [0u8; READ_CHUNK];

    loop {
        let n = match reader.read(&mut chunk) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => {
                debug!("markup stream ended with error: {}", e);
                break;
            }
        };

        pending.extend_from_slice(&chunk[..n]);
        let text = take_complete_utf8(&mut pending);
        if text.is_empty() {
            continue;
        }

        input.push_back(StrTendril::from_slice(&text));
        if let TokenizerResult::Script(()) = tokenizer.feed(&input) {
            return tokenizer.sink.fields.take().ok_or(ScanError::TagNotFound);
        }
    }

    if !pending.is_empty() {
        input.push_back(StrTendril::from_slice(&String::from_utf8_lossy(&pending)));
        if let TokenizerResult::Script(()) = tokenizer.feed(&input) {
            return tokenizer.sink.fields.take().ok_or(ScanError::TagNotFound);
        }
    }

    // A tag still open at end of input is discarded, never emitted
    tokenizer.end();
    tokenizer.sink.fields.take().ok_or(ScanError::TagNotFound)
}

/// Decode the buffered bytes, holding back a UTF-8 sequence cut off at the
/// end of the chunk. Invalid bytes become U+FFFD.
fn take_complete_utf8(pending: &mut Vec<u8>) -> String {
    let keep = incomplete_suffix_len(pending);
    let complete: Vec<u8> = pending.drain(..pending.len() - keep).collect();
    String::from_utf8_lossy(&complete).into_owned()
}

/// Length of a trailing multi-byte sequence that still lacks bytes
fn incomplete_suffix_len(bytes: &[u8]) -> usize {
    for len in 1..=bytes.len().min(3) {
        let lead = bytes[bytes.len() - len];
        if lead & 0xC0 == 0x80 {
            continue;
        }
        let needed = match lead {
            0xF0..=0xF7 => 4,
            0xE0..=0xEF => 3,
            0xC0..=0xDF => 2,
            _ => 1,
        };
        return if needed > len { len } else { 0 };
    }
    0
}

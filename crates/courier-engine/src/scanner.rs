//! Lexical scanner for command blocks embedded in model output.
//!
//! One compiled alternation applied globally over the text; matches come
//! back in document order as a typed [`BlockMatch`], so downstream stages
//! never inspect capture groups. Overlapping alternatives resolve
//! left-to-right, first alternative wins.

use regex::Regex;
use std::sync::OnceLock;

/// The block grammar, three alternatives:
/// 1. `writeFile <path> ```<lang> <content>``` `
/// 2. ` ``javascript <content>`` ` inline script
/// 3. `name(arg)` / `/name(arg)` over the closed command-name set, argument
///    excluding nested parentheses (single level only)
const BLOCK_GRAMMAR: &str = r"(?s)writeFile\s+(\S+)\s*```(\w+)\s*(.*?)```|``javascript\s*(.*?)\s*``|/?(googleSearch|webpageToText|viewImage|metaAction|suggestion|jobCompleted|jobFailed)\(([^()]*)\)";

fn grammar() -> &'static Regex {
    static GRAMMAR: OnceLock<Regex> = OnceLock::new();
    GRAMMAR.get_or_init(|| Regex::new(BLOCK_GRAMMAR).expect("block grammar compiles"))
}

/// One raw scanner match, tagged by the alternative that fired.
///
/// Fields are the raw captures; trimming and argument parsing happen in the
/// normalizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockMatch {
    WriteFile {
        path: String,
        language: String,
        content: String,
    },
    Script {
        content: String,
    },
    Named {
        name: String,
        arg: String,
    },
}

/// Find every command block in `text`, in document order.
pub fn scan(text: &str) -> Vec<BlockMatch> {
    grammar()
        .captures_iter(text)
        .map(|caps| {
            if caps.get(1).is_some() {
                BlockMatch::WriteFile {
                    path: caps[1].to_string(),
                    language: caps[2].to_string(),
                    content: caps[3].to_string(),
                }
            } else if let Some(content) = caps.get(4) {
                BlockMatch::Script {
                    content: content.as_str().to_string(),
                }
            } else {
                BlockMatch::Named {
                    name: caps[5].to_string(),
                    arg: caps[6].to_string(),
                }
            }
        })
        .collect()
}

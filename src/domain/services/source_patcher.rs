//! Source text patcher
//!
//! Guarded text edits on Java and Kotlin sources: add an import, insert a
//! statement into one method of one class, drop lines. This is a text-region
//! locator (class, then method, then balanced brace span), not a parser.
//! Every failure comes back as a value with the input left untouched.

use std::path::Path;

use regex::{Match, Regex};
use thiserror::Error;

/// Source language of a patched file, chosen by extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceLanguage {
    Java,
    Kotlin,
}

impl SourceLanguage {
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "java" => Some(SourceLanguage::Java),
            "kt" => Some(SourceLanguage::Kotlin),
            _ => None,
        }
    }

    /// Statement terminator (`;` for Java, nothing for Kotlin)
    pub fn terminator(&self) -> &'static str {
        match self {
            SourceLanguage::Java => ";",
            SourceLanguage::Kotlin => "",
        }
    }

    /// Append the terminator to a bare statement
    pub fn statement(&self, bare: &str) -> String {
        format!("{}{}", bare.trim_end().trim_end_matches(';'), self.terminator())
    }
}

/// Why a patch could not be applied
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatchError {
    #[error("class {class} not found")]
    ClassNotFound { class: String },
    #[error("method {method} not found in class {class}")]
    MethodNotFound { class: String, method: String },
    #[error("could not find closing brace for method {method} in class {class}")]
    UnbalancedBraces { class: String, method: String },
    #[error("line \"{anchor}\" not found in method {method} of class {class}")]
    AnchorNotFound {
        class: String,
        method: String,
        anchor: String,
    },
}

/// Result of one text patch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchOutcome {
    /// The text changed
    Changed(String),
    /// The edit was already present
    Unchanged,
    /// The edit could not be located; the text is untouched
    Failed(PatchError),
}

impl PatchOutcome {
    /// The patched text, or `original` when nothing changed
    pub fn into_text(self, original: &str) -> String {
        match self {
            PatchOutcome::Changed(text) => text,
            PatchOutcome::Unchanged | PatchOutcome::Failed(_) => original.to_string(),
        }
    }

    pub fn is_changed(&self) -> bool {
        matches!(self, PatchOutcome::Changed(_))
    }
}

/// Add `import <name>` unless already present, directly after the package
/// declaration (or at the top of a file without one).
pub fn add_import(text: &str, language: SourceLanguage, name: &str) -> PatchOutcome {
    let escaped = regex::escape(name);
    let existing = match language {
        SourceLanguage::Java => format!(r"(?m)^[ \t]*import\s+{}\s*;", escaped),
        SourceLanguage::Kotlin => format!(r"(?m)^[ \t]*import\s+{}[ \t]*$", escaped),
    };
    if compile(&existing).is_some_and(|re| first_code_match(&re, text).is_some()) {
        return PatchOutcome::Unchanged;
    }

    let line = format!("import {}{}", name, language.terminator());
    let package = compile(r"(?m)^[ \t]*package[ \t]+[\w.`]+[ \t]*;?")
        .and_then(|re| first_code_match(&re, text).map(|m| m.end()));
    let patched = match package {
        Some(at) => {
            let rest = &text[at..];
            let code = rest.trim_start();
            let gap = &rest[..rest.len() - code.len()];
            if gap.contains('\n') && code.starts_with("import ") {
                format!("{}{}{}\n{}", &text[..at], gap, line, code)
            } else {
                format!("{}\n\n{}{}", &text[..at], line, rest)
            }
        }
        None => format!("{}\n{}", line, text),
    };
    PatchOutcome::Changed(patched)
}

/// Insert `statement` into `method` of `class`.
///
/// With an `anchor`, the statement goes on a new line after the line holding
/// the anchor; otherwise just before the method's closing brace.
/// Already-present statements are left alone.
pub fn insert_in_method(
    text: &str,
    language: SourceLanguage,
    class: &str,
    method: &str,
    statement: &str,
    anchor: Option<&str>,
) -> PatchOutcome {
    let class_open = match find_class(text, language, class) {
        Some(pos) => pos,
        None => {
            return PatchOutcome::Failed(PatchError::ClassNotFound {
                class: class.to_string(),
            })
        }
    };
    let class_close = match matching_brace(text, class_open) {
        Some(pos) => pos,
        None => {
            return PatchOutcome::Failed(PatchError::UnbalancedBraces {
                class: class.to_string(),
                method: method.to_string(),
            })
        }
    };

    let method_end = match find_method(text, language, method, class_open, class_close) {
        Some(pos) => pos,
        None => {
            return PatchOutcome::Failed(PatchError::MethodNotFound {
                class: class.to_string(),
                method: method.to_string(),
            })
        }
    };

    let span = CodeBytes::new(text, method_end)
        .find(|&(_, b)| b == b'{')
        .and_then(|(open, _)| matching_brace(text, open).map(|close| (open, close)));
    let (open, close) = match span {
        Some(span) => span,
        None => {
            return PatchOutcome::Failed(PatchError::UnbalancedBraces {
                class: class.to_string(),
                method: method.to_string(),
            })
        }
    };

    let body = &text[open + 1..close];
    let statement = statement.trim();
    if body.contains(statement) {
        return PatchOutcome::Unchanged;
    }

    let patched = match anchor.map(str::trim) {
        Some(anchor) => {
            let found = match body.find(anchor) {
                Some(found) => found,
                None => {
                    return PatchOutcome::Failed(PatchError::AnchorNotFound {
                        class: class.to_string(),
                        method: method.to_string(),
                        anchor: anchor.to_string(),
                    })
                }
            };
            let anchor_end = open + 1 + found + anchor.len();
            let at = text[anchor_end..close]
                .find('\n')
                .map_or(close, |i| anchor_end + i);
            let indent = line_indent(text, open + 1 + found);
            format!("{}\n{}{}{}", &text[..at], indent, statement, &text[at..])
        }
        None => {
            let line_start = text[..close].rfind('\n').map(|i| i + 1).unwrap_or(0);
            let before_brace = &text[line_start..close];
            if before_brace.trim().is_empty() {
                let indent = body
                    .lines()
                    .rev()
                    .find(|line| !line.trim().is_empty())
                    .map(|line| line[..line.len() - line.trim_start().len()].to_string())
                    .unwrap_or_else(|| format!("{}    ", before_brace));
                format!(
                    "{}{}{}\n{}",
                    &text[..line_start],
                    indent,
                    statement,
                    &text[line_start..]
                )
            } else {
                format!("{}\n    {}\n{}", &text[..close], statement, &text[close..])
            }
        }
    };
    PatchOutcome::Changed(patched)
}

/// Drop every line containing `marker`.
pub fn remove_lines(text: &str, marker: &str) -> PatchOutcome {
    if marker.is_empty() || !text.contains(marker) {
        return PatchOutcome::Unchanged;
    }
    let kept: Vec<&str> = text.split('\n').filter(|line| !line.contains(marker)).collect();
    PatchOutcome::Changed(kept.join("\n"))
}

/// Whether `symbol` is still used outside import lines.
pub fn has_usage(text: &str, symbol: &str) -> bool {
    text.lines()
        .filter(|line| !line.trim_start().starts_with("import "))
        .any(|line| line.contains(symbol))
}

fn compile(pattern: &str) -> Option<Regex> {
    Regex::new(pattern).ok()
}

/// Offset of the opening brace of the class body
fn find_class(text: &str, language: SourceLanguage, class: &str) -> Option<usize> {
    let name = regex::escape(class);
    let pattern = match language {
        SourceLanguage::Java => format!(
            r"\bclass\s+{}(\s+extends\s+[\w.<>]+)?(\s+implements\s+[\w.<>,\s]+?)?\s*\{{",
            name
        ),
        SourceLanguage::Kotlin => format!(r"\bclass\s+{}\b(\s*\([^)]*\))?(\s*:[^{{]+)?\s*\{{", name),
    };
    let re = compile(&pattern)?;
    first_code_match(&re, text).map(|m| m.end() - 1)
}

/// Offset just past the first declaration of `method` that sits directly in
/// the class body spanning `open..close`. Members of nested, local and
/// anonymous classes are not candidates.
fn find_method(
    text: &str,
    language: SourceLanguage,
    method: &str,
    open: usize,
    close: usize,
) -> Option<usize> {
    let name = regex::escape(method);
    let pattern = match language {
        SourceLanguage::Java => format!(
            r"\b(public|protected|private)\s+(static\s+)?(final\s+)?\S+\s+{}\s*\(",
            name
        ),
        SourceLanguage::Kotlin => format!(r"\b(override\s+)?fun\s+{}\s*\(", name),
    };
    let re = compile(&pattern)?;
    let members = class_members(text, open, close);
    let end = re
        .find_iter(&text[..close])
        .filter(|m| m.start() > open)
        .find(|m| members.binary_search(&m.start()).is_ok())
        .map(|m| m.end());
    end
}

/// Sorted offsets of code bytes at the top level of the body `open..close`
fn class_members(text: &str, open: usize, close: usize) -> Vec<usize> {
    let mut depth = 0usize;
    let mut members = Vec::new();
    for (i, b) in CodeBytes::new(text, open + 1) {
        if i >= close {
            break;
        }
        match b {
            b'{' => depth += 1,
            b'}' => depth = depth.saturating_sub(1),
            _ if depth == 0 => members.push(i),
            _ => {}
        }
    }
    members
}

/// First match of `re` that starts in code rather than in a comment or
/// literal
fn first_code_match<'t>(re: &Regex, text: &'t str) -> Option<Match<'t>> {
    let mut code = CodeBytes::new(text, 0).map(|(i, _)| i).peekable();
    re.find_iter(text).find(|m| {
        while code.next_if(|&i| i < m.start()).is_some() {}
        code.peek() == Some(&m.start())
    })
}

/// Leading whitespace of the line holding byte `pos`
fn line_indent(text: &str, pos: usize) -> &str {
    let start = text[..pos].rfind('\n').map(|i| i + 1).unwrap_or(0);
    let line = &text[start..];
    let width = line.len() - line.trim_start_matches([' ', '\t']).len();
    &line[..width]
}

/// Offset of the brace closing the one at `open`
fn matching_brace(text: &str, open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (i, b) in CodeBytes::new(text, open) {
        match b {
            b'{' => depth += 1,
            b'}' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

/// Bytes of `text` that are code, skipping comments and string or char
/// literals
struct CodeBytes<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> CodeBytes<'a> {
    fn new(text: &'a str, from: usize) -> Self {
        Self {
            bytes: text.as_bytes(),
            pos: from,
        }
    }

    fn skip_past(&mut self, needle: &[u8]) {
        let rest = &self.bytes[self.pos.min(self.bytes.len())..];
        self.pos = match rest.windows(needle.len()).position(|w| w == needle) {
            Some(found) => self.pos + found + needle.len(),
            None => self.bytes.len(),
        };
    }

    fn skip_literal(&mut self, quote: u8) {
        while self.pos < self.bytes.len() {
            let b = self.bytes[self.pos];
            if b == b'\\' {
                self.pos += 2;
                continue;
            }
            self.pos += 1;
            if b == quote || b == b'\n' {
                return;
            }
        }
    }
}

impl Iterator for CodeBytes<'_> {
    type Item = (usize, u8);

    fn next(&mut self) -> Option<Self::Item> {
        while self.pos < self.bytes.len() {
            let i = self.pos;
            let b = self.bytes[i];
            let next = self.bytes.get(i + 1).copied();
            match (b, next) {
                (b'/', Some(b'/')) => {
                    self.pos = i + 2;
                    self.skip_past(b"\n");
                }
                (b'/', Some(b'*')) => {
                    self.pos = i + 2;
                    self.skip_past(b"*/");
                }
                (b'"', _) if self.bytes[i..].starts_with(b"\"\"\"") => {
                    self.pos = i + 3;
                    self.skip_past(b"\"\"\"");
                }
                (b'"', _) | (b'\'', _) => {
                    self.pos = i + 1;
                    self.skip_literal(b);
                }
                _ => {
                    self.pos = i + 1;
                    return Some((i, b));
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const JAVA: &str = "package com.example;

import android.app.Application;

public class MainApplication extends Application implements ReactApplication {
  @Override
  public void onCreate() {
    super.onCreate();
    SoLoader.init(this, false);
  }
}
";

    const KOTLIN: &str = "package com.example

import android.app.Application

class MainApplication : Application(), ReactApplication {
  override fun onCreate() {
    super.onCreate()
    SoLoader.init(this, false)
  }
}
";

    const IMPORT: &str = "com.facebook.react.views.text.ReactFontManager";

    fn patched(outcome: PatchOutcome) -> String {
        match outcome {
            PatchOutcome::Changed(text) => text,
            other => panic!("expected a change, got {:?}", other),
        }
    }

    #[test]
    fn language_from_extension() {
        assert_eq!(
            SourceLanguage::from_path(Path::new("a/MainApplication.kt")),
            Some(SourceLanguage::Kotlin)
        );
        assert_eq!(SourceLanguage::from_path(Path::new("a/B.scala")), None);
        assert_eq!(SourceLanguage::Java.statement("foo()"), "foo();");
        assert_eq!(SourceLanguage::Kotlin.statement("foo();"), "foo()");
    }

    #[test]
    fn add_import_directly_after_package() {
        let text = patched(add_import(JAVA, SourceLanguage::Java, IMPORT));
        assert!(text.starts_with(
            "package com.example;\n\nimport com.facebook.react.views.text.ReactFontManager;\nimport android"
        ));
    }

    #[test]
    fn add_import_after_package() {
        let text = patched(add_import(
            "package com.example;\n\nclass A {}\n",
            SourceLanguage::Java,
            "x.Y",
        ));
        assert_eq!(text, "package com.example;\n\nimport x.Y;\n\nclass A {}\n");
    }

    #[test]
    fn added_import_comes_out_cleanly() {
        let with_import = patched(add_import(JAVA, SourceLanguage::Java, IMPORT));
        let marker = format!("import {}", IMPORT);
        assert_eq!(patched(remove_lines(&with_import, &marker)), JAVA);
    }

    #[test]
    fn java_anchor_without_semicolon_inserts_after_the_line() {
        let text = patched(insert_in_method(
            JAVA,
            SourceLanguage::Java,
            "MainApplication",
            "onCreate",
            "register();",
            Some("super.onCreate()"),
        ));
        assert!(text.contains("    super.onCreate();\n    register();\n    SoLoader"));
    }

    #[test]
    fn add_import_is_idempotent() {
        let once = patched(add_import(KOTLIN, SourceLanguage::Kotlin, IMPORT));
        assert!(once.contains("import com.facebook.react.views.text.ReactFontManager\n"));
        assert_eq!(
            add_import(&once, SourceLanguage::Kotlin, IMPORT),
            PatchOutcome::Unchanged
        );
    }

    #[test]
    fn add_import_without_package_goes_first() {
        let text = patched(add_import("class A {}\n", SourceLanguage::Java, "x.Y"));
        assert_eq!(text, "import x.Y;\nclass A {}\n");
    }

    #[test]
    fn insert_after_anchor_keeps_indentation() {
        let text = patched(insert_in_method(
            JAVA,
            SourceLanguage::Java,
            "MainApplication",
            "onCreate",
            "register();",
            Some("super.onCreate();"),
        ));
        assert!(text.contains("    super.onCreate();\n    register();\n    SoLoader"));
    }

    #[test]
    fn insert_into_kotlin_method() {
        let text = patched(insert_in_method(
            KOTLIN,
            SourceLanguage::Kotlin,
            "MainApplication",
            "onCreate",
            "register()",
            Some("super.onCreate()"),
        ));
        assert!(text.contains("    super.onCreate()\n    register()\n"));
    }

    #[test]
    fn insert_before_closing_brace_without_anchor() {
        let text = patched(insert_in_method(
            JAVA,
            SourceLanguage::Java,
            "MainApplication",
            "onCreate",
            "register();",
            None,
        ));
        assert!(text.contains("SoLoader.init(this, false);\n    register();\n  }\n}"));
    }

    #[test]
    fn insert_twice_is_idempotent() {
        let once = insert_in_method(
            JAVA,
            SourceLanguage::Java,
            "MainApplication",
            "onCreate",
            "register();",
            Some("super.onCreate();"),
        )
        .into_text(JAVA);
        let twice = insert_in_method(
            &once,
            SourceLanguage::Java,
            "MainApplication",
            "onCreate",
            "register();",
            Some("super.onCreate();"),
        );
        assert_eq!(twice, PatchOutcome::Unchanged);
    }

    #[test]
    fn braces_inside_strings_and_comments_are_ignored() {
        let text = "class A {\n  public void run() {\n    log(\"}\"); // }\n    /* { */ char c = '}';\n  }\n  public void other() {}\n}\n";
        let out = patched(insert_in_method(
            text,
            SourceLanguage::Java,
            "A",
            "run",
            "done();",
            None,
        ));
        assert!(out.contains("char c = '}';\n    done();\n  }\n  public void other()"));
    }

    #[test]
    fn missing_class_fails_without_touching_text() {
        let outcome = insert_in_method(JAVA, SourceLanguage::Java, "Nope", "onCreate", "x();", None);
        assert!(matches!(outcome, PatchOutcome::Failed(PatchError::ClassNotFound { .. })));
        assert_eq!(outcome.into_text(JAVA), JAVA);
    }

    #[test]
    fn missing_method_fails() {
        let outcome = insert_in_method(
            JAVA,
            SourceLanguage::Java,
            "MainApplication",
            "onDestroy",
            "x();",
            None,
        );
        assert!(matches!(outcome, PatchOutcome::Failed(PatchError::MethodNotFound { .. })));
    }

    #[test]
    fn unbalanced_method_fails() {
        let text = "class A {\n  public void run() {\n    if (x) {\n";
        let outcome = insert_in_method(text, SourceLanguage::Java, "A", "run", "x();", None);
        assert!(matches!(outcome, PatchOutcome::Failed(PatchError::UnbalancedBraces { .. })));
    }

    #[test]
    fn missing_anchor_fails() {
        let outcome = insert_in_method(
            JAVA,
            SourceLanguage::Java,
            "MainApplication",
            "onCreate",
            "x();",
            Some("initFlipper();"),
        );
        assert!(matches!(outcome, PatchOutcome::Failed(PatchError::AnchorNotFound { .. })));
    }

    #[test]
    fn add_import_skips_commented_package_and_imports() {
        let text = "/*\npackage com.old;\nimport com.example.Fonts;\n*/\npackage com.example;\n\nclass A {}\n";
        let out = patched(add_import(text, SourceLanguage::Java, "com.example.Fonts"));
        assert_eq!(
            out,
            "/*\npackage com.old;\nimport com.example.Fonts;\n*/\npackage com.example;\n\nimport com.example.Fonts;\n\nclass A {}\n"
        );
    }

    const REGISTER: &str = "register();";
    const AFTER_SUPER: Option<&str> = Some("super.onCreate()");

    #[test]
    fn method_in_a_following_class_is_not_a_match() {
        let text = "public class MainApplication extends Application {\n  public void onTerminate() {\n  }\n}\n\nclass Helper {\n  public void onCreate() {\n    super.onCreate();\n  }\n}\n";
        let outcome = insert_in_method(
            text,
            SourceLanguage::Java,
            "MainApplication",
            "onCreate",
            REGISTER,
            AFTER_SUPER,
        );
        assert!(matches!(outcome, PatchOutcome::Failed(PatchError::MethodNotFound { .. })));
    }

    #[test]
    fn anonymous_class_method_is_skipped() {
        let text = "public class MainApplication extends Application {\n  private final Host host = new Host() {\n    public void onCreate() {\n      super.onCreate();\n    }\n  };\n\n  public void onCreate() {\n    super.onCreate();\n  }\n}\n";
        let out = patched(insert_in_method(
            text,
            SourceLanguage::Java,
            "MainApplication",
            "onCreate",
            REGISTER,
            AFTER_SUPER,
        ));
        assert!(out.contains("    public void onCreate() {\n      super.onCreate();\n    }\n  };"));
        assert!(out.ends_with("  public void onCreate() {\n    super.onCreate();\n    register();\n  }\n}\n"));
    }

    #[test]
    fn target_class_after_another_class_is_found() {
        let text = "class Helper {\n  public void onCreate() {\n    super.onCreate();\n  }\n}\n\npublic class MainApplication extends Application {\n  public void onCreate() {\n    super.onCreate();\n  }\n}\n";
        let out = patched(insert_in_method(
            text,
            SourceLanguage::Java,
            "MainApplication",
            "onCreate",
            REGISTER,
            AFTER_SUPER,
        ));
        assert!(out.starts_with("class Helper {\n  public void onCreate() {\n    super.onCreate();\n  }\n}"));
        assert!(out.contains("extends Application {\n  public void onCreate() {\n    super.onCreate();\n    register();\n"));
    }

    #[test]
    fn overloaded_methods_take_the_first_declaration() {
        let text = "public class MainApplication extends Application {\n  public void onCreate(Bundle state) {\n    super.onCreate();\n  }\n\n  public void onCreate() {\n    super.onCreate();\n  }\n}\n";
        let out = patched(insert_in_method(
            text,
            SourceLanguage::Java,
            "MainApplication",
            "onCreate",
            REGISTER,
            AFTER_SUPER,
        ));
        assert!(out.contains("onCreate(Bundle state) {\n    super.onCreate();\n    register();\n  }"));
        assert_eq!(out.matches(REGISTER).count(), 1);
    }

    #[test]
    fn commented_out_method_is_not_a_match() {
        let text = "public class MainApplication extends Application {\n  // public void onCreate() {\n  /* public void onCreate() { } */\n}\n";
        let outcome = insert_in_method(text, SourceLanguage::Java, "MainApplication", "onCreate", REGISTER, None);
        assert!(matches!(outcome, PatchOutcome::Failed(PatchError::MethodNotFound { .. })));
    }

    #[test]
    fn kotlin_companion_and_nested_members_are_skipped() {
        let text = "class MainApplication : Application(), ReactApplication {\n  companion object {\n    fun onCreate() {\n      super.onCreate()\n    }\n  }\n\n  class Inner {\n    fun onCreate() {\n      super.onCreate()\n    }\n  }\n\n  override fun onCreate() {\n    super.onCreate()\n  }\n}\n";
        let out = patched(insert_in_method(
            text,
            SourceLanguage::Kotlin,
            "MainApplication",
            "onCreate",
            "register()",
            AFTER_SUPER,
        ));
        assert_eq!(out.matches("register()").count(), 1);
        assert!(out.contains("  override fun onCreate() {\n    super.onCreate()\n    register()\n  }\n}\n"));
    }

    #[test]
    fn kotlin_method_only_in_a_nested_class_is_not_found() {
        let text = "class MainApplication : Application() {\n  companion object {\n    fun onCreate() {\n    }\n  }\n}\n";
        let outcome = insert_in_method(text, SourceLanguage::Kotlin, "MainApplication", "onCreate", "register()", None);
        assert!(matches!(outcome, PatchOutcome::Failed(PatchError::MethodNotFound { .. })));
    }

    #[test]
    fn remove_lines_by_marker() {
        let text = "a\nfoo(R.font.lato)\nb\n";
        assert_eq!(patched(remove_lines(text, "R.font.lato)")), "a\nb\n");
        assert_eq!(remove_lines(text, "R.font.other)"), PatchOutcome::Unchanged);
    }

    #[test]
    fn usage_ignores_import_lines() {
        let text = "import x.ReactFontManager;\nclass A {}\n";
        assert!(!has_usage(text, "ReactFontManager"));
        assert!(has_usage(
            "import x.ReactFontManager;\nReactFontManager.getInstance();\n",
            "ReactFontManager"
        ));
    }
}

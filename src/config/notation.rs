//! Compact step notation.
//!
//! A step can be written on one line as `verb:target`:
//!
//! | Notation | Action |
//! |---|---|
//! | `write:hello.txt=Hello` | write a file |
//! | `append:hello.txt=more` | append to a file |
//! | `read:hello.txt`, `read:notes.txt@latin1` | read as text |
//! | `read-raw:blob.bin` | read raw bytes |
//! | `exists:hello.txt` | check existence |
//! | `rename:a.txt->b.txt`, `move:a.txt->dir/a.txt` | rename or move |
//! | `delete:hello.txt` | delete a file |
//! | `mkdir:dir`, `list:dir`, `rmdir:dir` | directories |
//! | `copy:a.txt->b.txt` | copy a file |
//! | `read-json:data.json`, `write-json:user.json={"age":30}` | JSON |
//! | `lines:notes.txt` | read line by line |
//! | `watch:notes.txt` | register a change watch |
//!
//! A leading `!` runs the step even if the previous one failed. Values may be
//! wrapped in single or double quotes. The step is named by its notation.

use std::path::PathBuf;

use crate::config::schema::StepConfig;
use crate::error::{Result, StepfsError};
use crate::fs::{Encoding, FsAction};

/// Parse one step written in compact notation.
pub fn parse_step_spec(spec: &str) -> Result<StepConfig> {
    let trimmed = spec.trim();
    let (depends_on_previous, body) = match trimmed.strip_prefix('!') {
        Some(rest) => (false, rest.trim_start()),
        None => (true, trimmed),
    };

    let invalid = |message: String| StepfsError::InvalidStepSpec {
        spec: spec.to_string(),
        message,
    };

    let (verb, target) = body
        .split_once(':')
        .ok_or_else(|| invalid("expected 'action:target'".to_string()))?;
    if target.is_empty() {
        return Err(invalid("missing target".to_string()));
    }

    let assignment = || {
        target
            .split_once('=')
            .map(|(path, value)| (PathBuf::from(path), unquote(value).to_string()))
            .ok_or_else(|| invalid(format!("'{}' expects 'path=value'", verb)))
    };
    let pair = || {
        target
            .split_once("->")
            .map(|(from, to)| (PathBuf::from(from), PathBuf::from(to)))
            .ok_or_else(|| invalid(format!("'{}' expects 'from->to'", verb)))
    };
    let path = || PathBuf::from(target);

    let action = match verb {
        "write" => {
            let (path, content) = assignment()?;
            FsAction::Write { path, content }
        }
        "append" => {
            let (path, content) = assignment()?;
            FsAction::Append { path, content }
        }
        "read" => {
            let (path, encoding) = match target.rsplit_once('@') {
                Some((p, enc)) => match enc.parse::<Encoding>() {
                    Ok(encoding) => (PathBuf::from(p), Some(encoding)),
                    Err(_) => (path(), None),
                },
                None => (path(), None),
            };
            FsAction::Read {
                path,
                encoding,
                raw: false,
            }
        }
        "read-raw" => FsAction::Read {
            path: path(),
            encoding: None,
            raw: true,
        },
        "exists" => FsAction::Exists { path: path() },
        "rename" | "move" => {
            let (from, to) = pair()?;
            FsAction::Rename { from, to }
        }
        "copy" => {
            let (from, to) = pair()?;
            FsAction::Copy { from, to }
        }
        "delete" => FsAction::Delete { path: path() },
        "mkdir" => FsAction::Mkdir { path: path() },
        "list" => FsAction::List { path: path() },
        "rmdir" => FsAction::Rmdir { path: path() },
        "read-json" => FsAction::ReadJson { path: path() },
        "write-json" => {
            let (path, raw) = assignment()?;
            let value = serde_json::from_str(&raw)
                .map_err(|e| invalid(format!("invalid JSON value: {}", e)))?;
            FsAction::WriteJson { path, value }
        }
        "lines" => FsAction::ReadLines { path: path() },
        "watch" => FsAction::Watch { path: path() },
        other => return Err(invalid(format!("unknown action '{}'", other))),
    };

    Ok(StepConfig {
        name: body.to_string(),
        description: None,
        depends_on_previous,
        action,
    })
}

/// Parse several steps, failing on the first invalid one.
pub fn parse_step_specs<S: AsRef<str>>(specs: &[S]) -> Result<Vec<StepConfig>> {
    specs.iter().map(|s| parse_step_spec(s.as_ref())).collect()
}

fn unquote(value: &str) -> &str {
    for quote in ['\'', '"'] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_write_with_quoted_content() {
        let step = parse_step_spec("write:hello.txt='Hello'").unwrap();
        assert_eq!(step.name, "write:hello.txt='Hello'");
        assert!(step.depends_on_previous);
        assert_eq!(
            step.action,
            FsAction::Write {
                path: "hello.txt".into(),
                content: "Hello".into()
            }
        );
    }

    #[test]
    fn content_may_contain_equals() {
        let step = parse_step_spec("append:log.txt=a=b").unwrap();
        assert_eq!(
            step.action,
            FsAction::Append {
                path: "log.txt".into(),
                content: "a=b".into()
            }
        );
    }

    #[test]
    fn parses_read_with_encoding() {
        let step = parse_step_spec("read:notes.txt@latin1").unwrap();
        assert_eq!(
            step.action,
            FsAction::Read {
                path: "notes.txt".into(),
                encoding: Some(Encoding::Latin1),
                raw: false
            }
        );
    }

    #[test]
    fn unknown_encoding_suffix_stays_in_path() {
        let step = parse_step_spec("read:me@home.txt").unwrap();
        assert_eq!(
            step.action,
            FsAction::Read {
                path: "me@home.txt".into(),
                encoding: None,
                raw: false
            }
        );
    }

    #[test]
    fn parses_move_as_rename() {
        let step = parse_step_spec("move:backup.txt->myFolder/backup.txt").unwrap();
        assert_eq!(
            step.action,
            FsAction::Rename {
                from: "backup.txt".into(),
                to: "myFolder/backup.txt".into()
            }
        );
    }

    #[test]
    fn bang_marks_independent() {
        let step = parse_step_spec("!delete:tmp.txt").unwrap();
        assert!(!step.depends_on_previous);
        assert_eq!(step.name, "delete:tmp.txt");
    }

    #[test]
    fn parses_write_json() {
        let step = parse_step_spec(r#"write-json:user.json={"name":"John","age":30}"#).unwrap();
        assert_eq!(
            step.action,
            FsAction::WriteJson {
                path: "user.json".into(),
                value: json!({"name": "John", "age": 30})
            }
        );
    }

    #[test]
    fn rejects_bad_specs() {
        for spec in [
            "hello.txt",
            "teleport:x",
            "write:hello.txt",
            "copy:a.txt",
            "read:",
            "write-json:a.json={",
        ] {
            let err = parse_step_spec(spec).unwrap_err();
            assert!(
                matches!(err, StepfsError::InvalidStepSpec { .. }),
                "{} gave {:?}",
                spec,
                err
            );
        }
    }

    #[test]
    fn parses_many() {
        let steps = parse_step_specs(&["mkdir:dir", "list:dir"]).unwrap();
        assert_eq!(steps.len(), 2);
        assert!(parse_step_specs(&["mkdir:dir", "nope"]).is_err());
    }
}

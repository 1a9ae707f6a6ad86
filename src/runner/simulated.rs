use crate::runner::{ExampleRunner, ExecutionOutcome};

/// Checks an example without running it: the snippet must be non-empty,
/// strings must be closed and brackets balanced. On success the transcript
/// lists the `print` calls the snippet would make.
#[derive(Clone, Copy, Debug, Default)]
pub struct SimulatedRunner;

impl ExampleRunner for SimulatedRunner {
    fn execute(&self, code: &str) -> ExecutionOutcome {
        if code.trim().is_empty() {
            return ExecutionOutcome::Fault {
                message: "örnek kod boş".to_string(),
            };
        }
        if let Err(message) = check_structure(code) {
            return ExecutionOutcome::Fault { message };
        }

        let prints: Vec<&str> = code
            .lines()
            .map(str::trim)
            .filter(|line| line.starts_with("print("))
            .collect();

        let mut output = format!(
            "Kod denetlendi: {} satır, {} print çağrısı",
            code.lines().filter(|l| !l.trim().is_empty()).count(),
            prints.len()
        );
        for call in prints {
            output.push_str("\n  > ");
            output.push_str(call);
        }
        ExecutionOutcome::Success { output }
    }
}

/// Python-flavoured scan: `#` comments, single/double quoted and
/// triple-quoted strings with backslash escapes, and `()[]{}` nesting.
fn check_structure(code: &str) -> Result<(), String> {
    let chars: Vec<char> = code.chars().collect();
    let mut stack: Vec<(char, usize)> = Vec::new();
    let mut line = 1;
    let mut i = 0;

    while i < chars.len() {
        let ch = chars[i];
        match ch {
            '\n' => line += 1,
            '#' => {
                while i < chars.len() && chars[i] != '\n' {
                    i += 1;
                }
                continue;
            }
            '\'' | '"' => {
                let start_line = line;
                let triple = i + 2 < chars.len() && chars[i + 1] == ch && chars[i + 2] == ch;
                i += if triple { 3 } else { 1 };
                let mut closed = false;
                while i < chars.len() {
                    let c = chars[i];
                    if c == '\\' {
                        i += 2;
                        continue;
                    }
                    if c == '\n' {
                        if !triple {
                            break;
                        }
                        line += 1;
                    }
                    if c == ch {
                        if !triple {
                            closed = true;
                            i += 1;
                            break;
                        }
                        if i + 2 < chars.len() && chars[i + 1] == ch && chars[i + 2] == ch {
                            closed = true;
                            i += 3;
                            break;
                        }
                    }
                    i += 1;
                }
                if !closed {
                    return Err(format!("{start_line}. satırda kapanmamış metin"));
                }
                continue;
            }
            '(' | '[' | '{' => stack.push((ch, line)),
            ')' | ']' | '}' => {
                let expected = match ch {
                    ')' => '(',
                    ']' => '[',
                    _ => '{',
                };
                match stack.pop() {
                    Some((open, _)) if open == expected => {}
                    Some((open, open_line)) => {
                        return Err(format!(
                            "{line}. satırda beklenmeyen '{ch}' ({open_line}. satırdaki '{open}' açık)"
                        ));
                    }
                    None => return Err(format!("{line}. satırda eşleşmeyen '{ch}'")),
                }
            }
            _ => {}
        }
        i += 1;
    }

    match stack.pop() {
        Some((open, open_line)) => Err(format!("{open_line}. satırdaki '{open}' kapanmamış")),
        None => Ok(()),
    }
}

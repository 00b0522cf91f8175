//! Compile command implementation.

use std::fs;
use std::io::Write;

use crate::cli::args::CompileArgs;
use crate::error::{Result, VigilError};
use crate::script::{Declaration, ScriptCompiler};

use super::dispatcher::{Command, CommandResult};

/// Compiles a script file and prints its declarations.
pub struct CompileCommand {
    args: CompileArgs,
}

impl CompileCommand {
    pub fn new(args: CompileArgs) -> Self {
        Self { args }
    }
}

impl Command for CompileCommand {
    fn execute(&self, out: &mut dyn Write) -> Result<CommandResult> {
        let source = fs::read_to_string(&self.args.script)?;
        let script = match ScriptCompiler::global().compile(&source) {
            Ok(script) => script,
            Err(VigilError::ScriptCompilation { diagnostics }) => {
                for diagnostic in &diagnostics {
                    writeln!(out, "{}:{diagnostic}", self.args.script.display())?;
                }
                return Ok(CommandResult::failure(1));
            }
            Err(err) => return Err(err),
        };

        if self.args.json {
            let json = serde_json::to_string_pretty(script.as_ref()).map_err(anyhow::Error::from)?;
            writeln!(out, "{json}")?;
            return Ok(CommandResult::success());
        }

        for declaration in &script.declarations {
            match declaration {
                Declaration::Class { name, supertype } => match supertype {
                    Some(supertype) => {
                        writeln!(out, "class {} : {supertype}", script.qualified_name(name))?
                    }
                    None => writeln!(out, "class {}", script.qualified_name(name))?,
                },
                Declaration::Property { name, mutable, ty, .. } => {
                    let keyword = if *mutable { "var" } else { "val" };
                    writeln!(out, "{keyword} {}: {ty}", script.qualified_name(name))?;
                }
            }
        }
        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn run(source: &str) -> (CommandResult, String) {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.vgs");
        fs::write(&path, source).unwrap();
        let mut out = Vec::new();
        let result = CompileCommand::new(CompileArgs {
            script: path,
            json: false,
        })
        .execute(&mut out)
        .unwrap();
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn prints_declarations() {
        let (result, output) = run("package cfg\nclass Marker\nvar limit = 3\n");
        assert!(result.success);
        assert_eq!(output, "class cfg.Marker\nvar cfg.limit: Int\n");
    }

    #[test]
    fn prints_diagnostics_on_failure() {
        let (result, output) = run("val x: Missing\n");
        assert_eq!(result.exit_code, 1);
        assert!(output.ends_with(":line 1: Unresolved reference: Missing\n"));
    }
}

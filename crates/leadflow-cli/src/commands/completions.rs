use anyhow::Result;
use clap::{CommandFactory, ValueEnum};
use clap_complete::{generate, Shell};
use std::io::{self, Write};

#[derive(Debug, clap::Args)]
pub struct CompletionsArgs {
    #[arg(value_enum)]
    pub shell: CompletionShell,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
    #[value(name = "powershell")]
    PowerShell,
    Elvish,
}

impl From<CompletionShell> for Shell {
    fn from(shell: CompletionShell) -> Self {
        match shell {
            CompletionShell::Bash => Shell::Bash,
            CompletionShell::Zsh => Shell::Zsh,
            CompletionShell::Fish => Shell::Fish,
            CompletionShell::PowerShell => Shell::PowerShell,
            CompletionShell::Elvish => Shell::Elvish,
        }
    }
}

pub fn emit(args: CompletionsArgs) -> Result<()> {
    write_script(args.shell, &mut io::stdout().lock())
}

fn write_script(shell: CompletionShell, out: &mut dyn Write) -> Result<()> {
    let mut cmd = crate::Cli::command();
    let name = cmd.get_name().to_string();
    generate(Shell::from(shell), &mut cmd, name, out);
    out.flush()?;
    Ok(())
}

use std::path::PathBuf;

pub const USAGE: &str = "\
usage: emojimix [--verbose] [--db PATH] [--json] [COMMAND]

commands:
  list [--json]   show all mixes (default)
  add [N]         generate N new mixes (default 1)
  clear           delete every mix
  help            show this message";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List { json: bool },
    Add(usize),
    Clear,
    Help,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cli {
    pub verbose: bool,
    pub db: Option<PathBuf>,
    pub command: Command,
}

impl Cli {
    pub fn parse(args: &[String]) -> Result<Self, String> {
        let mut verbose = false;
        let mut db = None;
        let mut json = false;
        let mut words: Vec<&str> = Vec::new();

        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--verbose" | "-v" => verbose = true,
                "--db" => {
                    let path = iter.next().ok_or("--db needs a path")?;
                    db = Some(PathBuf::from(path));
                }
                "--json" => json = true,
                "--help" | "-h" => words.push("help"),
                other => words.push(other),
            }
        }

        let command = match words.as_slice() {
            [] | ["list"] => Command::List { json },
            ["add"] => Command::Add(1),
            ["add", n] => match n.parse::<usize>() {
                Ok(n) if n > 0 => Command::Add(n),
                _ => return Err(format!("invalid count '{}'", n)),
            },
            ["clear"] => Command::Clear,
            ["help", ..] => Command::Help,
            [other, ..] => return Err(format!("unknown command '{}'", other)),
        };

        if json && !matches!(command, Command::List { .. } | Command::Help) {
            return Err("--json only applies to list".to_string());
        }

        Ok(Self { verbose, db, command })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, String> {
        let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
        Cli::parse(&args)
    }

    #[test]
    fn defaults_to_list() {
        let cli = parse(&[]).unwrap();
        assert_eq!(cli.command, Command::List { json: false });
        assert!(!cli.verbose);
        assert_eq!(cli.db, None);
    }

    #[test]
    fn flags_anywhere() {
        let cli = parse(&["add", "--db", "/tmp/x.sqlite", "3", "-v"]).unwrap();
        assert_eq!(cli.command, Command::Add(3));
        assert!(cli.verbose);
        assert_eq!(cli.db, Some(PathBuf::from("/tmp/x.sqlite")));
    }

    #[test]
    fn list_json() {
        let json = Command::List { json: true };
        assert_eq!(parse(&["list", "--json"]).unwrap().command, json);
        assert_eq!(parse(&["--json", "list"]).unwrap().command, json);
        assert_eq!(parse(&["--json"]).unwrap().command, json);
        assert!(parse(&["add", "--json"]).is_err());
    }

    #[test]
    fn rejects_bad_input() {
        assert!(parse(&["add", "0"]).is_err());
        assert!(parse(&["add", "many"]).is_err());
        assert!(parse(&["shuffle"]).is_err());
        assert!(parse(&["--db"]).is_err());
    }

    #[test]
    fn help_flag() {
        assert_eq!(parse(&["--help"]).unwrap().command, Command::Help);
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommandLineConfig {
    pub database: String,
    pub command: String,
    pub command_args: Vec<String>,
    pub verbose: bool,
}

impl CommandLineConfig {
    pub fn from_args(args: &[&str]) -> Result<Self, String> {
        let mut database = String::from("hypergraph.db");
        let mut command = None;
        let mut command_args = Vec::new();
        let mut verbose = false;
        let mut iter = args.iter().skip(1);
        while let Some(arg) = iter.next() {
            match *arg {
                "--db" | "--database" => {
                    database = iter
                        .next()
                        .ok_or_else(|| "--db requires a value".to_string())?
                        .to_string();
                }
                "-v" | "--verbose" => verbose = true,
                other if other.starts_with('-') && command.is_none() => {
                    return Err(format!("unknown flag {other}"));
                }
                other if command.is_none() => command = Some(other.to_string()),
                other => command_args.push(other.to_string()),
            }
        }
        let command = command.unwrap_or_else(|| String::from("status"));
        let expected = match command.as_str() {
            "init" | "status" | "audit" => 0,
            "dump" => 1,
            "select" => 2,
            other => return Err(format!("unknown command {other}")),
        };
        if command_args.len() != expected {
            return Err(format!(
                "{command} takes {expected} argument(s), got {}",
                command_args.len()
            ));
        }
        Ok(Self {
            database,
            command,
            command_args,
            verbose,
        })
    }

    pub fn help() -> &'static str {
        "Usage: hypergraph [--db PATH] [-v] <command>\n\
         \n\
         Commands:\n\
         \x20 init                     create or reset every table\n\
         \x20 status                   record count per table\n\
         \x20 audit                    report dangling references and mismatched keys\n\
         \x20 dump TABLE               print one JSON record per line\n\
         \x20 select TABLE PREDICATE   print records matching e.g. \"stock>0\"\n"
    }
}

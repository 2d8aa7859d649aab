use clap::Parser;

/// Takes no options; everything is asked interactively.
#[derive(Parser)]
#[command(name = "expo-migrator")]
#[command(version)]
#[command(about = "Migrate an Expo project to a new SDK version")]
#[command(
    long_about = "Migrate an Expo project to a new SDK version.\n\n\
    The project folder is renamed to old_<name> and rebuilt from scratch: a clean \
    package.json, the chosen Expo version, your source files, and your old \
    dependencies reinstalled at versions compatible with the new SDK."
)]
pub struct Cli {}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_rejects_unknown_flags() {
        assert!(Cli::try_parse_from(["expo-migrator"]).is_ok());
        assert!(Cli::try_parse_from(["expo-migrator", "--force"]).is_err());
    }
}

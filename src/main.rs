use clap::Parser;

mod commands;
mod output;

use commands::deploy;

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "mastodon-deploy")]
#[command(version = VERSION)]
#[command(about = "Performs the compilation and deployment of the Mastodon artifacts")]
struct Cli {
    #[command(flatten)]
    deploy: deploy::DeployArgs,
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    let exit_code = output::print_result(deploy::run(cli.deploy));

    std::process::ExitCode::from(exit_code_to_u8(exit_code))
}

fn exit_code_to_u8(code: i32) -> u8 {
    if code <= 0 {
        0
    } else if code >= 255 {
        255
    } else {
        code as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn all_flags_default_off() {
        let cli = Cli::try_parse_from(["mastodon-deploy"]).unwrap();
        assert!(!cli.deploy.preview);
        assert!(!cli.deploy.install_to_default);
        assert!(!cli.deploy.build);
        assert!(!cli.deploy.skip_up_to_date);
        assert!(!cli.deploy.skip_unstaged);
        assert!(cli.deploy.config.is_none());
    }

    #[test]
    fn kebab_case_flags_parse() {
        let cli = Cli::try_parse_from([
            "mastodon-deploy",
            "--install-to-default",
            "--skip-up-to-date",
            "--repo-root",
            "/src",
        ])
        .unwrap();
        assert!(cli.deploy.install_to_default);
        assert!(cli.deploy.skip_up_to_date);
        assert_eq!(cli.deploy.repo_root.as_deref(), Some("/src"));
    }
}

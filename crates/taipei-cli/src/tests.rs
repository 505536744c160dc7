use super::*;

#[test]
fn parses_fetch_with_defaults() {
    let cli = Cli::try_parse_from(["taipei-cli", "fetch"]).expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Commands::Fetch {
            page: 1,
            lang: None
        }
    ));
}

#[test]
fn parses_fetch_with_page_and_lang() {
    let cli = Cli::try_parse_from(["taipei-cli", "fetch", "--page", "4", "--lang", "en"])
        .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Commands::Fetch {
            page: 4,
            lang: Some(ref l)
        } if l == "en"
    ));
}

#[test]
fn fetch_rejects_page_zero() {
    let result = Cli::try_parse_from(["taipei-cli", "fetch", "--page", "0"]);
    assert!(result.is_err());
}

#[test]
fn parses_browse_with_keyword() {
    let cli = Cli::try_parse_from(["taipei-cli", "browse", "--keyword", "溫泉"])
        .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Commands::Browse {
            lang: None,
            keyword: Some(ref k)
        } if k == "溫泉"
    ));
}

#[test]
fn subcommand_is_required() {
    assert!(Cli::try_parse_from(["taipei-cli"]).is_err());
}

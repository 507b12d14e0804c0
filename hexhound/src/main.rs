use colored::Colorize;
use hexhound::commands::command_argument_builder;
use hexhound::handlers;

#[tokio::main]
async fn main() {
    let cmd = command_argument_builder();
    let chosen_command = cmd.get_matches();
    let quiet = chosen_command.get_flag("quiet");

    // Show banner unless --quiet flag is set
    if !quiet {
        print_banner();
    }

    if chosen_command.subcommand().is_none() {
        // No subcommand provided, just show the banner
        return;
    }

    match chosen_command.subcommand() {
        Some(("scan", primary_command)) => handlers::handle_scan(primary_command).await,
        _ => unreachable!("clap should ensure we don't get here"),
    }
}

fn print_banner() {
    let banner = r#"
  _  _ _____  __ _  _  ___  _   _ _  _ ___
 | || | __\ \/ /| || |/ _ \| | | | \| |   \
 | __ | _| >  < | __ | (_) | |_| | .` | |) |
 |_||_|___/_/\_\|_||_|\___/ \___/|_|\_|___/
"#;
    println!("{}", banner.bright_cyan());
    println!(
        "  {} {}",
        "hexhound".bright_white().bold(),
        format!("v{} — hidden listing digest hunter", env!("CARGO_PKG_VERSION")).bright_black()
    );
    println!();
}

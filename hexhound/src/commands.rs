use crate::CLAP_STYLING;
use clap::{arg, command};
use std::net::IpAddr;

pub fn command_argument_builder() -> clap::Command {
    clap::Command::new("hexhound")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("hexhound")
        .styles(CLAP_STYLING)
        .arg(arg!(-q --"quiet" "Suppress banner and non-essential output").required(false))
        .subcommand_required(false)
        .subcommand(
            command!("scan")
                .about(
                    "Walk a host's hidden directory listings depth-first, inspecting marker \
                files for digest-like content.",
                )
                .arg(
                    arg!(-i --"ip" <IP>)
                        .required(false)
                        .help("Target IP address (repeatable)")
                        .value_parser(clap::value_parser!(IpAddr))
                        .action(clap::ArgAction::Append)
                        .conflicts_with("targets-file"),
                )
                .arg(
                    arg!(-T --"targets-file" <PATH>)
                        .required(false)
                        .help("Path to a newline-delimited file of target IP addresses")
                        .value_parser(clap::value_parser!(std::path::PathBuf))
                        .conflicts_with("ip"),
                )
                .arg(
                    arg!(--"root" <PATH>)
                        .required(false)
                        .help("Listing root to start the walk from")
                        .default_value("/.hidden/"),
                )
                .arg(
                    arg!(--"marker" <NAME>)
                        .required(false)
                        .help("Marker file name inspected in every directory")
                        .default_value("README"),
                )
                .arg(
                    arg!(--"timeout" <SECONDS>)
                        .required(false)
                        .help("Request timeout in seconds")
                        .value_parser(clap::value_parser!(u64))
                        .default_value("10"),
                )
                .arg(
                    arg!(--"keep-going")
                        .required(false)
                        .help(
                            "Record failing branches and continue with siblings instead of \
                        aborting on the first error",
                        )
                        .action(clap::ArgAction::SetTrue),
                )
                .arg(
                    arg!(-f --"format" <FORMAT>)
                        .required(false)
                        .help("Report format: text, json")
                        .value_parser(["text", "json"])
                        .default_value("text"),
                )
                .arg(
                    arg!(-o --"output" <PATH>)
                        .required(false)
                        .help("Save report to file (default: display to screen)")
                        .value_parser(clap::value_parser!(std::path::PathBuf)),
                ),
        )
}

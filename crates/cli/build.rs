use std::{env, fs, path::PathBuf};

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=OUT_DIR");

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let completions_dir = out_dir.join("completions");

    fs::create_dir_all(&completions_dir).unwrap();

    let mut cmd = clap::Command::new("ladle")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Ladle Contributors")
        .about("Find elements in HTML pages by tag and attribute")
        .arg(clap::arg!([INPUT] "URL to fetch, local HTML file, or '-' for stdin"))
        .arg(
            clap::arg!(-q --find <QUERY> "Query step: tag, tag@key=value, or @key=value")
                .value_name("QUERY")
                .action(clap::ArgAction::Append),
        )
        .arg(clap::arg!(--strict "Compare attribute values as whole strings instead of class tokens"))
        .arg(clap::arg!(-a --all "Return every match of the last query step"))
        .arg(
            clap::arg!(-f --format <FORMAT> "Output format (text, full-text, html, attrs, json)")
                .value_name("FORMAT")
                .default_value("full-text")
                .value_parser(["text", "full-text", "html", "attrs", "json"]),
        )
        .arg(
            clap::arg!(-o --output <FILE> "Output file (default: stdout)")
                .value_name("FILE")
                .value_parser(clap::value_parser!(std::path::PathBuf)),
        )
        .arg(clap::arg!(--timeout <SECS> "HTTP timeout in seconds").default_value("30"))
        .arg(
            clap::arg!(--user_agent <UA> "Custom User-Agent for HTTP requests")
                .long("user-agent")
                .value_name("UA"),
        )
        .arg(
            clap::arg!(-H --header <HEADER> "Extra request header, NAME:VALUE")
                .value_name("NAME:VALUE")
                .action(clap::ArgAction::Append),
        )
        .arg(
            clap::arg!(--cookie <COOKIE> "Request cookie, NAME=VALUE")
                .value_name("NAME=VALUE")
                .action(clap::ArgAction::Append),
        )
        .arg(clap::arg!(--fail_fast "Abort on the first failed lookup").long("fail-fast"))
        .arg(clap::arg!(-v --verbose "Enable debug logging"))
        .arg(
            clap::arg!(--completions <SHELL> "Generate shell completion script")
                .value_name("SHELL")
                .value_parser(["bash", "elvish", "fish", "powershell", "zsh"]),
        );

    clap_complete::generate_to(clap_complete::shells::Bash, &mut cmd, "ladle", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Zsh, &mut cmd, "ladle", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Fish, &mut cmd, "ladle", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::PowerShell, &mut cmd, "ladle", &completions_dir).unwrap();

    println!(
        "cargo:warning=Shell completions generated in: {}",
        completions_dir.display()
    );
}

// generates man page from clap CLI definition
// outputs to man/bexpr.1

use bexpr::cli::Cli;
use clap::CommandFactory;
use clap_mangen::Man;

fn main() -> std::io::Result<()> {
    let cmd = Cli::command();
    let man = Man::new(cmd);

    std::fs::create_dir_all("man")?;

    let mut buffer = Vec::new();
    man.render(&mut buffer)?;
    std::fs::write("man/bexpr.1", buffer)?;

    println!("Generated man/bexpr.1");
    Ok(())
}

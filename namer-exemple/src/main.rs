use std::path::PathBuf;

use clap::Parser;
use log::info;
use namer_core::{DirectoryProvider, Engine, NameChooser};

/// Prints sample names for every known tag.
#[derive(Parser, Debug)]
#[command(name = "namer-exemple", about = "Sample names from the name generator")]
struct Args {
    /// Data directory holding `config.json` (defaults to the embedded data)
    #[arg(long)]
    data: Option<PathBuf>,

    /// Number of names per kind and tag
    #[arg(long, default_value_t = 5)]
    count: usize,

    /// Seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,

    /// Only print this tag
    #[arg(long)]
    tag: Option<String>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    // Load the tables, either embedded in the binary or from a folder
    let mut namer = match &args.data {
        Some(dir) => Engine::build(&DirectoryProvider::new(dir))?,
        None => Engine::new()?,
    };
    if let Some(seed) = args.seed {
        namer = namer.with_seed(seed);
    }
    info!("loaded tags: {}", namer.tags().join(", "));

    // Without a tag, every call picks a random one
    println!("town: {}", namer.town());
    println!("character [male]: {}", namer.male());
    println!("character [female]: {}", namer.female());
    println!("place: {}", namer.place());
    println!("river: {}", namer.river());

    let tags = match args.tag {
        Some(tag) => vec![tag],
        None => namer.tags(),
    };

    // A scoped view keeps generating from the same tag
    for tag in tags {
        let view = namer.tag(&tag);
        println!("Tag [{}]", view.tag());

        println!("\tTowns");
        for _ in 0..args.count {
            println!("\t\t{}", view.town());
        }

        println!("\tCharacter [male]");
        for _ in 0..args.count {
            println!("\t\t{}", view.male());
        }

        println!("\tCharacter [female]");
        for _ in 0..args.count {
            println!("\t\t{}", view.female());
        }

        println!("\tPlaces");
        for _ in 0..args.count {
            println!("\t\t{}", view.place());
        }

        println!("\tRiver");
        for _ in 0..args.count {
            println!("\t\t{}", view.river());
        }
    }

    Ok(())
}

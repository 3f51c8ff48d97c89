mod cli;

use anyhow::{anyhow, Result};
use clap::Parser;
use cli::{Cli, Commands};
use common::{ConfigLoader, FsExt};
use dotenv::dotenv;
use env_logger::Env;
use log::{info, warn};
use pipeline::{
    extract, find_archives, postprocess, ExtractOptions, JosekiPersistance, PostprocessOptions,
};
use std::path::Path;

fn main() -> Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Extract(extract_args) => {
            let config = load_config(&extract_args.config, "extract")?;
            let extract_options: ExtractOptions = config.load()?;

            let archive_dir = config.get_relative_path_or("archive_dir", "sgf_archive")?;
            let output_path = config.get_relative_path_or("output_path", "joseki.sgf")?;

            assert_dir_exists(&archive_dir)?;

            let archives = find_archives(&archive_dir);
            info!("Found {} archives in {:?}", archives.len(), archive_dir);

            let (tree, _stats) = extract(&archives, &extract_options)?;

            info!(
                "Writing joseki tree with {} nodes to {:?}",
                tree.num_nodes(),
                output_path
            );

            JosekiPersistance::new(output_path).write(&tree)?;
        }
        Commands::Postprocess(postprocess_args) => {
            let config = load_config(&postprocess_args.config, "postprocess")?;
            let postprocess_options: PostprocessOptions = config.load()?;

            let input_path = config.get_relative_path_or("input_path", "joseki.sgf")?;
            let output_path =
                config.get_relative_path_or("output_path", "joseki_postprocessed.sgf")?;

            postprocess(
                &JosekiPersistance::new(input_path),
                &JosekiPersistance::new(output_path),
                &postprocess_options,
            )?;
        }
        Commands::CountLeaves(count_leaves_args) => {
            let path = count_leaves_args.path.relative_to_cwd()?;
            let tree = JosekiPersistance::new(path).read()?;

            println!("{}", tree.count_leaves());
        }
    }

    Ok(())
}

fn load_config(path: &str, scope: &str) -> Result<ConfigLoader> {
    let config_path = path.relative_to_cwd()?;

    if config_path.is_file() {
        ConfigLoader::new(config_path, scope.to_string())
    } else {
        warn!(
            "Config file {:?} not found, using environment and defaults",
            config_path
        );
        Ok(ConfigLoader::env_only(scope.to_string()))
    }
}

fn assert_dir_exists<P: AsRef<Path>>(dir: P) -> Result<()> {
    if dir.as_ref().is_dir() {
        Ok(())
    } else {
        Err(anyhow!("{:?} is not a valid directory", dir.as_ref()))
    }
}

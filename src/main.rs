// src/main.rs

use initq::errors::InitQError;
use initq::{cli, logging, run};

fn main() {
    if let Err(err) = run_main() {
        eprintln!("initq error: {err:?}");
        let fatal = err
            .downcast_ref::<InitQError>()
            .is_some_and(InitQError::is_fatal);
        std::process::exit(if fatal { 2 } else { 1 });
    }
}

fn run_main() -> anyhow::Result<()> {
    let args = cli::parse();
    logging::init_logging(args.log_level)?;
    let state = run(&args)?;
    if let Some(listen) = state.listen {
        println!("ready on {listen}");
    }
    Ok(())
}

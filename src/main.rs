use modal_mass::config::RunConfig;
use modal_mass::pipeline::{run, RunOutcome};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = RunConfig::default();
    match run(&config)? {
        RunOutcome::MissingInput(path) => {
            println!("Requested file does not exist: {}", path.display());
        }
        RunOutcome::Completed(summary) => {
            let [x, y, z] = summary.maxima;
            println!(
                "{} modes: max. accumulated ratio (x,y,z) = ({x:.1}, {y:.1}, {z:.1}) %",
                summary.mode_count
            );
        }
    }

    Ok(())
}

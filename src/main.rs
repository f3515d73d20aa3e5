use anyhow::{Context, Result};
use lifegrid::{Codec, JsonSnapshot, LifeGrid, RunLengthEncoded};
use std::{thread, time::Duration};

mod options;
mod stats;

use stats::Recorder;

fn args_to_grid(args: &options::Args) -> Result<LifeGrid> {
    let (width, height) = args.grid_size()?;

    if let Some(file_name) = args.input_file() {
        let decoder = RunLengthEncoded::default().with_min_size(width, height);
        let encoded_str = std::fs::read_to_string(&file_name)
            .with_context(|| format!("read pattern from {file_name}"))?;
        return decoder
            .decode(&encoded_str)
            .with_context(|| format!("decode pattern in {file_name}"));
    }

    let glider = (args.orientation()?, args.configuration()?);
    Ok(args
        .fill_mode()?
        .create_grid((width, height), glider, &mut rand::rng()))
}

/// How many generations to step and how to pace them
struct Schedule {
    generations: usize,
    sleep: Option<Duration>,
    parallel: bool,
    /// stop once a generation equals its predecessor
    until_settled: bool,
}
impl Schedule {
    fn run<R: Recorder>(&self, mut grid: LifeGrid, stats: &mut R) -> LifeGrid {
        for _ in 0..self.generations {
            if stats.has_report() {
                log::info!("{}", stats.report().as_ref());
            }

            // compute the next generation
            let next = if self.parallel {
                grid.next_generation_parallel()
            } else {
                grid.next_generation()
            };
            let settled = next.cells() == grid.cells();
            grid = next;
            stats.record(grid.generation(), grid.alive_count());

            if settled && self.until_settled {
                log::info!("settled into a still life at generation {}", grid.generation());
                break;
            }
            if let Some(time) = self.sleep {
                thread::sleep(time);
            }
        }
        grid
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let Some(args) = options::Args::from_env()? else {
        return Ok(());
    };

    let grid = args_to_grid(&args)?;
    log::info!(
        "starting {}x{} grid, alive: {}",
        grid.width(),
        grid.height(),
        grid.alive_count()
    );

    let schedule = Schedule {
        generations: args.generations()?,
        sleep: args.sleep()?,
        parallel: args.multithreading(),
        until_settled: args.until_settled(),
    };
    if schedule.parallel {
        log::info!("stepping on {} threads", rayon::current_num_threads());
    }

    let mut stats = stats::SwitchRecorder::new(grid.alive_count(), args.stats_file().is_some());
    let grid = schedule.run(grid, &mut stats);
    log::info!(
        "stopped at generation {}, alive: {}",
        grid.generation(),
        grid.alive_count()
    );

    if let Some(file_name) = args.output_file() {
        let encoder = RunLengthEncoded::default().set_name("lifegrid generated pattern");
        let encoded = encoder.encode(&grid)?;
        std::fs::write(&file_name, encoded)
            .with_context(|| format!("write pattern to {file_name}"))?;
        log::info!("pattern written to {file_name}");
    }
    if let Some(file_name) = args.snapshot_file() {
        let json = JsonSnapshot.encode(&grid)?;
        std::fs::write(&file_name, json)
            .with_context(|| format!("write snapshot to {file_name}"))?;
        log::info!("snapshot written to {file_name}");
    }
    if let Some(file_name) = args.stats_file() {
        stats
            .save(&file_name)
            .with_context(|| format!("write stats to {file_name}"))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lifegrid::{Pos2, patterns};

    fn schedule(generations: usize, until_settled: bool) -> Schedule {
        Schedule {
            generations,
            sleep: None,
            parallel: false,
            until_settled,
        }
    }

    #[test]
    fn runs_every_requested_generation_by_default() {
        let mut stats = stats::SimpleRecord::new(0);

        let grid = schedule(100, false).run(LifeGrid::blank(8, 8), &mut stats);

        assert_eq!(grid.generation(), 100);
    }

    #[test]
    fn until_settled_stops_on_a_still_life() {
        let block = patterns::block(8, 8, Pos2::one());
        let mut stats = stats::SimpleRecord::new(block.alive_count());

        let grid = schedule(100, true).run(block.clone(), &mut stats);

        assert_eq!(grid.generation(), 1);
        assert_eq!(grid.cells(), block.cells());
    }

    #[test]
    fn until_settled_keeps_an_oscillator_running() {
        let blinker = patterns::blinker(8, 8, Pos2::one());
        let mut stats = stats::SimpleRecord::new(blinker.alive_count());

        let grid = schedule(10, true).run(blinker.clone(), &mut stats);

        assert_eq!(grid.generation(), 10);
        assert_eq!(grid.cells(), blinker.cells());
    }
}

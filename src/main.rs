use std::{
    env,
    io::{self, Write},
    str::FromStr,
};

use anyhow::{anyhow, bail, Context, Result};
use env_logger::Env;
use lib_2048::{Config, Direction, Engine, MoveOutcome};
use log::{info, warn};

const USAGE: &str = "usage: slide-2048 [--rows N] [--cols N] [--seed S] MOVES\n\
    MOVES is a string of u, d, l, r (moves) and n (restart)";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Step {
    Shift(Direction),
    Restart,
}

fn parse_steps(moves: &str) -> Result<Vec<Step>> {
    moves
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| match c.to_ascii_lowercase() {
            'u' => Ok(Step::Shift(Direction::Up)),
            'd' => Ok(Step::Shift(Direction::Down)),
            'l' => Ok(Step::Shift(Direction::Left)),
            'r' => Ok(Step::Shift(Direction::Right)),
            'n' => Ok(Step::Restart),
            other => Err(anyhow!("unknown move {other:?}")),
        })
        .collect()
}

fn parse_value<T>(value: Option<&String>, flag: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let value = value.with_context(|| format!("missing value for {flag}"))?;

    value
        .parse()
        .with_context(|| format!("invalid value for {flag}: {value}"))
}

fn parse_args(args: &[String]) -> Result<(Config, String)> {
    let mut config = Config::default();
    let mut moves = None;
    let mut args = args.iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--rows" => config.rows = parse_value(args.next(), "--rows")?,
            "--cols" => config.cols = parse_value(args.next(), "--cols")?,
            "--seed" => config.seed = Some(parse_value(args.next(), "--seed")?),
            flag if flag.starts_with("--") => bail!("unknown option {flag}\n{USAGE}"),
            other if moves.is_none() => moves = Some(other.to_owned()),
            other => bail!("unexpected argument {other}\n{USAGE}"),
        }
    }

    let moves = moves.context(USAGE)?;

    Ok((config, moves))
}

fn subscribe_logging(engine: &Engine) {
    let events = engine.events();

    events.restarted.subscribe(|_, restarted| {
        info!(
            "new game on a {}x{} grid",
            restarted.cells.rows(),
            restarted.cells.cols()
        );
        Ok(())
    });

    for direction in Direction::iter() {
        events.moved(direction).subscribe(|_, moved| {
            let travelled: usize = moved.shifts.iter().map(|(_, shift)| shift).sum();
            info!("{:?}: tiles travelled {travelled} cells", moved.direction);
            Ok(())
        });
    }

    events.cell_created.subscribe(|_, created| {
        info!("{} appeared at {}", created.value, created.coord);
        Ok(())
    });

    events.score_updated.subscribe(|_, update| {
        match update.best {
            Some(best) => info!("score {} (new best {best})", update.score),
            None => info!("score {}", update.score),
        }
        Ok(())
    });

    events.game_over.subscribe(|engine, _| {
        warn!("no moves left, final score {}", engine.score());
        Ok(())
    });
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let args: Vec<_> = env::args().skip(1).collect();
    let (config, moves) = parse_args(&args)?;
    let steps = parse_steps(&moves)?;

    let engine = Engine::new(config)?;
    subscribe_logging(&engine);
    engine.restart()?;

    let mut blocked = 0;

    for step in steps {
        match step {
            Step::Restart => engine.restart()?,
            Step::Shift(direction) => {
                if engine.shift(direction)? == MoveOutcome::Blocked {
                    blocked += 1;
                }
            }
        }
    }

    let mut stdout = io::stdout().lock();

    writeln!(
        stdout,
        "Score: {}  Best: {}  Blocked moves: {blocked}{}",
        engine.score(),
        engine.best_score(),
        if engine.is_game_over() { "  Game over" } else { "" }
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parses_moves_and_restart() {
        let steps = parse_steps("uL d\nrn").unwrap();

        assert_eq!(
            steps,
            [
                Step::Shift(Direction::Up),
                Step::Shift(Direction::Left),
                Step::Shift(Direction::Down),
                Step::Shift(Direction::Right),
                Step::Restart,
            ]
        );
    }

    #[test]
    fn rejects_unknown_move() {
        assert!(parse_steps("ulx").is_err());
    }

    #[test]
    fn parses_options_in_any_order() {
        let (config, moves) =
            parse_args(&args(&["--seed", "9", "udlr", "--rows", "3", "--cols", "5"])).unwrap();

        assert_eq!(config, Config::new(3, 5).with_seed(9));
        assert_eq!(moves, "udlr");
    }

    #[test]
    fn defaults_to_four_by_four() {
        let (config, _) = parse_args(&args(&["l"])).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn reports_bad_arguments() {
        assert!(parse_args(&args(&[])).is_err());
        assert!(parse_args(&args(&["--rows"])).is_err());
        assert!(parse_args(&args(&["--rows", "four", "l"])).is_err());
        assert!(parse_args(&args(&["--speed", "2", "l"])).is_err());
        assert!(parse_args(&args(&["l", "r"])).is_err());
    }
}

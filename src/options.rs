use anyhow::{Context, Result, anyhow};
use lifegrid::{Configuration, LifeGrid, Orientation, Pos2, patterns};
use std::{str::FromStr, time::Duration};

const DEFAULT_SIZE: (usize, usize) = (64, 32);

pub struct Args {
    matches: getopts::Matches,
}

impl Args {
    fn options() -> getopts::Options {
        let mut opts = getopts::Options::new();
        opts.optflag("", "help", "print this help menu");
        opts.optflag("t", "threads", "step generations on the rayon thread pool");
        opts.optflag("u", "until-settled", "stop once a generation equals the last one");
        opts.optopt("o", "output", "write the last generation as RLE", "FILE");
        opts.optopt("i", "input", "start from an RLE pattern", "FILE");
        opts.optopt("", "snapshot", "write the last generation as JSON", "FILE");
        opts.optopt("w", "width", "set grid width", "WIDTH");
        opts.optopt("h", "height", "set grid height", "HEIGHT");
        opts.optopt(
            "f",
            "fill",
            "starting pattern: random, blank, block, blinker, glider, fleet, duel or gun",
            "TYPE",
        );
        opts.optopt("", "orientation", "glider orientation for --fill glider", "DIR");
        opts.optopt("", "configuration", "glider configuration, 0 or 1", "N");
        opts.optopt(
            "s",
            "sleep",
            "the amount of time to sleep between generations",
            "MILLIS",
        );
        opts.optopt("g", "gens", "max number of generations", "COUNT");
        opts.optopt("", "stats", "write stats csv to file", "FILE");
        opts
    }

    /// Parses `args`, returning `Ok(None)` when only help was requested
    fn new<T: AsRef<str>>(args: &[T]) -> Result<Option<Self>> {
        let opts = Self::options();
        let matches = opts.parse(args.iter().map(T::as_ref))?;
        if matches.opt_present("help") {
            println!("{}", opts.usage("usage: lifegrid [options]"));
            Ok(None)
        } else {
            Ok(Some(Self { matches }))
        }
    }
    pub fn from_env() -> Result<Option<Self>> {
        let env = std::env::args().skip(1).collect::<Vec<_>>();
        Self::new(&env)
    }

    fn parsed<T>(&self, name: &str) -> Result<Option<T>>
    where
        T: FromStr,
        T::Err: std::error::Error + Send + Sync + 'static,
    {
        self.matches
            .opt_get(name)
            .with_context(|| format!("invalid value for --{name}"))
    }

    pub fn multithreading(&self) -> bool {
        self.matches.opt_present("threads")
    }

    pub fn until_settled(&self) -> bool {
        self.matches.opt_present("until-settled")
    }

    pub fn generations(&self) -> Result<usize> {
        // kinda hacky way of saying "infinity"
        Ok(self.parsed("gens")?.unwrap_or(usize::MAX))
    }
    pub fn sleep(&self) -> Result<Option<Duration>> {
        Ok(self.parsed("sleep")?.map(Duration::from_millis))
    }

    pub fn grid_size(&self) -> Result<(usize, usize)> {
        let width = self.parsed("width")?.unwrap_or(DEFAULT_SIZE.0);
        let height = self.parsed("height")?.unwrap_or(DEFAULT_SIZE.1);
        if width == 0 || height == 0 {
            return Err(anyhow!("grid size must be positive, got {width}x{height}"));
        }
        Ok((width, height))
    }
    pub fn fill_mode(&self) -> Result<FillMode> {
        let mode_str = self.matches.opt_str("fill");
        let mode = mode_str.as_deref().unwrap_or("random");
        FillMode::new(mode).ok_or_else(|| anyhow!("unknown fill mode `{mode}`"))
    }
    pub fn orientation(&self) -> Result<Option<Orientation>> {
        self.parsed("orientation")
    }
    pub fn configuration(&self) -> Result<Option<Configuration>> {
        match self.parsed::<u8>("configuration")? {
            Some(index) => Configuration::from_index(index)
                .map(Some)
                .ok_or_else(|| anyhow!("configuration must be 0 or 1, got {index}")),
            None => Ok(None),
        }
    }

    pub fn output_file(&self) -> Option<String> {
        self.matches.opt_str("output")
    }
    pub fn input_file(&self) -> Option<String> {
        self.matches.opt_str("input")
    }
    pub fn snapshot_file(&self) -> Option<String> {
        self.matches.opt_str("snapshot")
    }
    pub fn stats_file(&self) -> Option<String> {
        self.matches.opt_str("stats")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillMode {
    Random,
    Blank,
    Block,
    Blinker,
    Glider,
    Fleet,
    Duel,
    Gun,
}
impl FillMode {
    fn new<S: AsRef<str>>(s: S) -> Option<Self> {
        match s.as_ref() {
            "random" => Some(Self::Random),
            "blank" | "empty" => Some(Self::Blank),
            "block" => Some(Self::Block),
            "blinker" => Some(Self::Blinker),
            "glider" => Some(Self::Glider),
            "fleet" => Some(Self::Fleet),
            "duel" => Some(Self::Duel),
            "gun" => Some(Self::Gun),
            _ => None,
        }
    }

    /// Builds the starting grid; `glider` only applies to [`FillMode::Glider`]
    pub fn create_grid<R: rand::Rng + ?Sized>(
        self,
        (w, h): (usize, usize),
        glider: (Option<Orientation>, Option<Configuration>),
        rng: &mut R,
    ) -> LifeGrid {
        // top-left of a 3x3 box around the middle of the grid
        let center = Pos2::new(w as i32 / 2 - 1, h as i32 / 2 - 1);
        match self {
            Self::Random => LifeGrid::fresh_with(w, h, rng),
            Self::Blank => LifeGrid::blank(w, h),
            Self::Block => patterns::block(w, h, center),
            Self::Blinker => patterns::blinker(w, h, center),
            Self::Glider => {
                let (orientation, configuration) = glider;
                let orientation = orientation.unwrap_or(Orientation::South);
                let configuration = configuration.unwrap_or_else(|| Configuration::random(rng));
                patterns::lone_glider(w, h, center, orientation, Some(configuration))
            }
            Self::Fleet => patterns::glider_fleet(w, h, rng),
            Self::Duel => patterns::duelling_gliders(w, h, rng),
            Self::Gun => patterns::glider_gun(w, h),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    fn args(list: &[&str]) -> Args {
        Args::new(list).expect("valid args").expect("not help")
    }

    #[test]
    fn fill_mode_parses() {
        let args = args(&["--fill", "fleet"]);

        assert_eq!(args.fill_mode().unwrap(), FillMode::Fleet);
    }

    #[test]
    fn defaults_apply_without_options() {
        let args = args(&[]);

        assert_eq!(args.grid_size().unwrap(), DEFAULT_SIZE);
        assert_eq!(args.fill_mode().unwrap(), FillMode::Random);
        assert_eq!(args.generations().unwrap(), usize::MAX);
        assert_eq!(args.sleep().unwrap(), None);
        assert!(!args.multithreading());
        assert!(!args.until_settled());
    }

    #[test]
    fn short_options_are_typed() {
        let args = args(&["-w", "10", "-h", "7", "-g", "3", "-s", "25", "-t", "-u"]);

        assert_eq!(args.grid_size().unwrap(), (10, 7));
        assert_eq!(args.generations().unwrap(), 3);
        assert_eq!(args.sleep().unwrap(), Some(Duration::from_millis(25)));
        assert!(args.multithreading());
        assert!(args.until_settled());
    }

    #[test]
    fn bad_values_are_errors_not_panics() {
        assert!(args(&["--width", "wide"]).grid_size().is_err());
        assert!(args(&["--width", "0"]).grid_size().is_err());
        assert!(args(&["--fill", "soup"]).fill_mode().is_err());
        assert!(args(&["--orientation", "up"]).orientation().is_err());
        assert!(args(&["--configuration", "2"]).configuration().is_err());
        assert!(Args::new(&["--bogus"]).is_err());
    }

    #[test]
    fn help_returns_none() {
        assert!(Args::new(&["--help"]).unwrap().is_none());
    }

    #[test]
    fn glider_fill_uses_requested_shape() {
        let args = args(&["--fill", "glider", "--orientation", "east", "--configuration", "1"]);
        let glider = (args.orientation().unwrap(), args.configuration().unwrap());

        let grid = args
            .fill_mode()
            .unwrap()
            .create_grid((12, 12), glider, &mut StdRng::seed_from_u64(0));

        let mut expected = lifegrid::glider::glider_cells(
            Pos2::new(5, 5),
            Orientation::East,
            Configuration::Second,
        );
        expected.sort();
        assert_eq!(grid.alive_cells().collect::<Vec<_>>(), expected);
    }

    #[test]
    fn blinker_fill_oscillates_in_the_middle() {
        let grid = FillMode::Blinker.create_grid((8, 8), (None, None), &mut rand::rng());

        assert_eq!(
            grid.alive_cells().collect::<Vec<_>>(),
            vec![Pos2::new(3, 3), Pos2::new(4, 3), Pos2::new(5, 3)]
        );
        assert_eq!(grid.next_generation().next_generation().cells(), grid.cells());
    }

    #[test]
    fn blank_fill_is_empty() {
        let grid = FillMode::Blank.create_grid((5, 4), (None, None), &mut rand::rng());

        assert_eq!(grid.alive_count(), 0);
        assert_eq!(grid.cells().len(), 20);
    }
}

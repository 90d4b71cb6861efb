//! Tests for command-line interface parsing and file processing

#[cfg(test)]
mod tests {
    use crate::common::{CORRIDOR_START, corridor, corridor_with_sealed_room};
    use clap::Parser;
    use mazenav::io::cli::{Cli, FileProcessor};
    use mazenav::io::configuration::{DEFAULT_MAX_TICKS, DEFAULT_START};
    use mazenav::io::image::raster_to_image;
    use mazenav::io::recording::RecordedPath;
    use mazenav::spatial::{Cell, Raster};
    use mazenav::{MazeError, NavigatorConfig};
    use std::path::{Path, PathBuf};

    fn write_maze(dir: &Path, name: &str, raster: &Raster) -> PathBuf {
        let file = dir.join(name);
        raster_to_image(raster).save(&file).expect("writable");
        file
    }

    fn corridor_args(target: &Path) -> Vec<String> {
        vec![
            "program".to_string(),
            target.display().to_string(),
            "-x".to_string(),
            CORRIDOR_START[0].to_string(),
            "-y".to_string(),
            CORRIDOR_START[1].to_string(),
            "--quiet".to_string(),
        ]
    }

    // Tests CLI parsing with only the required target argument
    // Verified by changing default values to ensure defaults are used
    #[test]
    fn test_cli_parse_minimal_args() {
        let cli = Cli::parse_from(["program", "maze.png"]);

        assert_eq!(cli.target, PathBuf::from("maze.png"));
        assert_eq!(cli.start(), Cell::from(DEFAULT_START));
        assert_eq!(cli.max_ticks, DEFAULT_MAX_TICKS);
        assert_eq!(cli.navigator_config(), NavigatorConfig::default());
        assert!(cli.replay.is_none());
        assert!(!cli.visualize);
        assert!(!cli.record);
    }

    // Tests CLI parsing with all solver arguments
    // Verified by swapping step and agent size fields
    #[test]
    fn test_cli_parse_solver_args() {
        let cli = Cli::parse_from([
            "program",
            "maze.png",
            "--step",
            "5",
            "--agent-size",
            "8",
            "--exit-range",
            "20",
            "--min-opening",
            "3",
            "--check-depth",
            "7",
            "--max-ticks",
            "500",
        ]);

        let config = cli.navigator_config();
        assert_eq!(config.step_size, 5);
        assert_eq!(config.agent_size, 8);
        assert_eq!(config.exit_range, 20);
        assert_eq!(config.min_opening_width, 3);
        assert_eq!(config.check_depth, 7);
        assert_eq!(cli.max_ticks, 500);
    }

    // Tests short flags and negative start coordinates
    // Verified by disallowing negative numbers for the start
    #[test]
    fn test_cli_short_flags() {
        let cli = Cli::parse_from([
            "program", "maze.png", "-x", "-4", "-y", "12", "-s", "2", "-v", "-r", "-q", "-n",
        ]);

        assert_eq!(cli.start(), Cell::new(-4, 12));
        assert_eq!(cli.step, 2);
        assert!(cli.visualize);
        assert!(cli.record);
        assert!(!cli.should_show_progress());
        assert!(!cli.skip_existing());
    }

    // Tests the default log filter follows --verbose
    // Verified by inverting the verbose check
    #[test]
    fn test_log_level() {
        assert_eq!(Cli::parse_from(["program", "maze.png"]).log_level(), "warn");
        assert_eq!(
            Cli::parse_from(["program", "maze.png", "--verbose"]).log_level(),
            "info"
        );
    }

    // Tests a single maze is solved with PNG, GIF and recording outputs
    // Verified by saving the recording before solving
    #[test]
    fn test_process_single_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let maze = write_maze(dir.path(), "corridor.png", &corridor());
        let mut args = corridor_args(&maze);
        args.extend(["--visualize".to_string(), "--record".to_string()]);

        FileProcessor::new(Cli::parse_from(args))
            .process()
            .expect("processing should succeed");

        assert!(dir.path().join("corridor_solved.png").exists());
        assert!(dir.path().join("corridor_solve.gif").exists());
        let recording =
            RecordedPath::load(&dir.path().join("corridor_path.json")).expect("recording saved");
        assert_eq!(recording.len(), 17);
    }

    // Tests directories are processed and earlier outputs are skipped
    // Verified by treating solved outputs as inputs
    #[test]
    fn test_process_directory() {
        let dir = tempfile::tempdir().expect("temp dir");
        write_maze(dir.path(), "a.png", &corridor());
        write_maze(dir.path(), "b.png", &corridor());
        std::fs::write(dir.path().join("notes.txt"), "not a maze").expect("writable");

        FileProcessor::new(Cli::parse_from(corridor_args(dir.path())))
            .process()
            .expect("first pass should succeed");
        assert!(dir.path().join("a_solved.png").exists());
        assert!(dir.path().join("b_solved.png").exists());

        FileProcessor::new(Cli::parse_from(corridor_args(dir.path())))
            .process()
            .expect("second pass should succeed");
        assert!(!dir.path().join("a_solved_solved.png").exists());
    }

    // Tests an unreachable exit is reported without failing the batch
    // Verified by returning an error for stuck mazes
    #[test]
    fn test_process_stuck_maze() {
        let dir = tempfile::tempdir().expect("temp dir");
        let maze = write_maze(dir.path(), "sealed.png", &corridor_with_sealed_room());
        let target = maze.display().to_string();
        let cli = Cli::parse_from([
            "program",
            target.as_str(),
            "-x",
            "25",
            "-y",
            "65",
            "--quiet",
            "--record",
        ]);

        FileProcessor::new(cli)
            .process()
            .expect("stuck mazes do not fail the batch");
        assert!(dir.path().join("sealed_solved.png").exists());
        assert!(!dir.path().join("sealed_path.json").exists());
    }

    // Tests a recorded path is replayed instead of solving
    // Verified by ignoring the replay option
    #[test]
    fn test_process_replay() {
        let dir = tempfile::tempdir().expect("temp dir");
        let maze = write_maze(dir.path(), "corridor.png", &corridor());
        let recording = dir.path().join("moves.json");
        RecordedPath::from_points(vec![Cell::new(20, 25), Cell::new(30, 25)])
            .save(&recording)
            .expect("writable");

        let mut args = corridor_args(&maze);
        args.extend(["--replay".to_string(), recording.display().to_string()]);
        FileProcessor::new(Cli::parse_from(args))
            .process()
            .expect("replay should succeed");

        assert!(dir.path().join("corridor_solved.png").exists());
    }

    // Tests invalid targets and parameters are rejected up front
    // Verified by accepting any existing file as a target
    #[test]
    fn test_process_rejects_bad_input() {
        let dir = tempfile::tempdir().expect("temp dir");
        let text = dir.path().join("maze.txt");
        std::fs::write(&text, "not a maze").expect("writable");

        let result = FileProcessor::new(Cli::parse_from(corridor_args(&text))).process();
        assert!(matches!(result, Err(MazeError::InvalidParameter { .. })));

        let missing = dir.path().join("absent.png");
        let result = FileProcessor::new(Cli::parse_from(corridor_args(&missing))).process();
        assert!(result.is_err());

        let maze = write_maze(dir.path(), "corridor.png", &corridor());
        let mut args = corridor_args(&maze);
        args.extend(["--step".to_string(), "0".to_string()]);
        let result = FileProcessor::new(Cli::parse_from(args)).process();
        assert!(matches!(
            result,
            Err(MazeError::InvalidParameter {
                parameter: "step_size",
                ..
            })
        ));
    }
}

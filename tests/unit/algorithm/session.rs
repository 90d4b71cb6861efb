//! Tests for the maze session: setup, manual movement, solving and playback

#[cfg(test)]
mod tests {
    use crate::common::{BLACK, CORRIDOR_START, Canvas, WHITE, corridor, framed_room};
    use mazenav::algorithm::openings::Border;
    use mazenav::io::configuration::MAX_GEOMETRY_PX;
    use mazenav::io::recording::RecordedPath;
    use mazenav::spatial::{Cell, Direction};
    use mazenav::{MazeError, MazeSession, NavigatorConfig, SolveState, TickOutcome};

    fn corridor_session() -> MazeSession {
        MazeSession::with_defaults(corridor(), Cell::from(CORRIDOR_START))
            .expect("corridor session should build")
    }

    // Tests setup resolves endpoints and places the agent at the start
    // Verified by measuring the exit from the entrance
    #[test]
    fn test_setup() {
        let session = corridor_session();

        assert_eq!(session.pose(), Cell::from(CORRIDOR_START));
        assert_eq!(session.start(), Cell::from(CORRIDOR_START));
        assert_eq!(session.entrance(), Cell::new(0, 30));
        assert_eq!(session.exit(), Cell::new(199, 30));
        assert_eq!(session.endpoints().exit.border, Border::Right);
        assert_eq!(session.state(), SolveState::Idle);
        assert_eq!(session.config(), &NavigatorConfig::default());
        assert!(!session.is_busy());
    }

    // Tests the worked framed-room example end to end
    // Verified by sampling the traversable color at the origin
    #[test]
    fn test_framed_room_session() {
        let mut session = MazeSession::with_defaults(framed_room(), Cell::new(42, 2))
            .expect("framed room session should build");

        assert_eq!(session.entrance(), Cell::new(43, 0));
        assert_eq!(session.exit(), Cell::new(63, 99));
        assert!(session.is_valid_move(42, 2));
        assert!(!session.is_valid_move(-5, 2));

        assert_eq!(session.run(1000, |_, _| {}), SolveState::Solved);
        assert!(session.pose().within_axis_range(session.exit(), 35));
    }

    // Tests setup failures map to the right error variants
    // Verified by clamping out-of-raster starts into the image
    #[test]
    fn test_setup_errors() {
        assert!(matches!(
            MazeSession::with_defaults(corridor(), Cell::new(500, 25)),
            Err(MazeError::InvalidStart { .. })
        ));
        assert!(matches!(
            MazeSession::with_defaults(corridor(), Cell::new(195, 25)),
            Err(MazeError::InvalidStart { .. })
        ));

        let sealed = Canvas::new(100, 100, WHITE)
            .rect(0, 0, 99, 0, BLACK)
            .rect(0, 99, 99, 99, BLACK)
            .rect(0, 0, 0, 99, BLACK)
            .rect(99, 0, 99, 99, BLACK)
            .build();
        assert!(matches!(
            MazeSession::with_defaults(sealed, Cell::new(50, 50)),
            Err(MazeError::MazeTopology {
                openings_found: 0,
                ..
            })
        ));

        let config = NavigatorConfig {
            step_size: 0,
            ..NavigatorConfig::default()
        };
        assert!(matches!(
            MazeSession::new(corridor(), Cell::from(CORRIDOR_START), config),
            Err(MazeError::InvalidParameter { .. })
        ));
    }

    // Tests config validation rejects each non-positive parameter
    // Verified by validating only the step size
    #[test]
    fn test_config_validation() {
        assert!(NavigatorConfig::default().validate().is_ok());

        let configs = [
            NavigatorConfig {
                agent_size: -1,
                ..NavigatorConfig::default()
            },
            NavigatorConfig {
                exit_range: 0,
                ..NavigatorConfig::default()
            },
            NavigatorConfig {
                min_opening_width: 0,
                ..NavigatorConfig::default()
            },
            NavigatorConfig {
                check_depth: 0,
                ..NavigatorConfig::default()
            },
        ];
        for config in configs {
            assert!(config.validate().is_err());
        }
    }

    // Tests pixel distances are bounded so grid arithmetic cannot overflow
    // Verified by checking only the lower bound
    #[test]
    fn test_config_upper_bound() {
        let at_limit = NavigatorConfig {
            step_size: MAX_GEOMETRY_PX,
            agent_size: MAX_GEOMETRY_PX,
            exit_range: MAX_GEOMETRY_PX,
            ..NavigatorConfig::default()
        };
        assert!(at_limit.validate().is_ok());

        let huge_step = NavigatorConfig {
            step_size: i32::MAX,
            ..NavigatorConfig::default()
        };
        assert!(matches!(
            MazeSession::new(corridor(), Cell::from(CORRIDOR_START), huge_step),
            Err(MazeError::InvalidParameter {
                parameter: "step_size",
                ..
            })
        ));

        let huge_agent = NavigatorConfig {
            agent_size: MAX_GEOMETRY_PX + 1,
            ..NavigatorConfig::default()
        };
        assert!(huge_agent.validate().is_err());
    }

    // Tests manual moves go in whole steps and respect walls
    // Verified by moving in pixels instead of steps
    #[test]
    fn test_manual_moves() {
        let mut session = corridor_session();

        assert!(session.move_agent(1, 0));
        assert_eq!(session.pose(), Cell::new(20, 25));
        assert!(!session.move_agent(0, -1));
        assert!(session.move_in(Direction::Right));
        assert!(!session.move_in(Direction::Down));
        assert_eq!(session.pose(), Cell::new(30, 25));
    }

    // Tests oversized move requests are refused instead of wrapping around
    // Verified by multiplying steps without overflow checks
    #[test]
    fn test_overflowing_moves_refused() {
        let mut session = corridor_session();
        assert!(session.move_agent(2, 0));

        session.start_recording();
        assert!(!session.move_agent(i32::MAX, 0));
        assert!(!session.move_agent(i32::MIN, 0));
        assert!(!session.move_agent(0, i32::MAX));
        assert!(!session.move_agent(i32::MAX / 10 + 1, 0));

        assert_eq!(session.pose(), Cell::new(30, 25));
        assert_eq!(session.stop_recording().map(|r| r.len()), Some(1));
    }

    // Tests manual moves are refused while a run is active
    // Verified by removing the busy check from move_agent
    #[test]
    fn test_moves_refused_while_solving() {
        let mut session = corridor_session();

        assert!(session.start_solve());
        assert!(session.is_busy());
        assert!(matches!(session.tick(), TickOutcome::Advanced(_)));

        let pose = session.pose();
        assert!(!session.move_agent(1, 0));
        assert_eq!(session.pose(), pose);
        assert!(!session.start_solve());
    }

    // Tests run reports every tick and stops at the budget
    // Verified by ticking once more than the budget
    #[test]
    fn test_run_budget() {
        let mut session = corridor_session();
        let mut reported = 0;

        assert_eq!(session.run(5, |_, _| reported += 1), SolveState::Solving);
        assert_eq!(reported, 5);

        let mut last = TickOutcome::Inactive;
        assert_eq!(session.run(100, |_, outcome| last = outcome), SolveState::Solved);
        assert!(matches!(last, TickOutcome::Solved(_)));
        assert_eq!(session.navigator().ticks(), 17);
        assert!(session.final_distance().is_some());
    }

    // Tests terminal states persist until reset and a new run starts from the current pose
    // Verified by restarting from the original start after reset
    #[test]
    fn test_reset_and_resolve() {
        let mut session = corridor_session();
        session.run(100, |_, _| {});

        assert!(!session.start_solve());
        assert_eq!(session.run(100, |_, _| {}), SolveState::Solved);

        session.reset_solve();
        assert_eq!(session.state(), SolveState::Idle);
        assert!(!session.is_busy());
        assert!(session.move_agent(-1, 0));
        assert!(session.start_solve());
        assert_eq!(session.navigator().path(), &[Cell::new(160, 25)]);
    }

    // Tests recording captures manual moves and solver steps in order
    // Verified by not seeding the recording with the current pose
    #[test]
    fn test_recording() {
        let mut session = corridor_session();
        assert!(!session.is_recording());

        session.start_recording();
        session.move_agent(1, 0);
        session.move_agent(0, -1);
        session.move_agent(1, 0);
        assert!(session.is_recording());

        let recorded = session.stop_recording().expect("recording was started");
        assert_eq!(
            recorded.points(),
            &[Cell::new(10, 25), Cell::new(20, 25), Cell::new(30, 25)]
        );
        assert!(!session.is_recording());
        assert_eq!(session.stop_recording(), None);

        session.start_recording();
        session.run(100, |_, _| {});
        let solved = session.stop_recording().expect("recording was started");
        assert_eq!(solved.len(), 15);
        assert_eq!(solved.points().last(), Some(&Cell::new(170, 25)));
    }

    // Tests the solution is the path stack from start to the exit cell
    // Verified by returning the visited set instead of the stack
    #[test]
    fn test_solution() {
        let mut session = corridor_session();
        session.run(100, |_, _| {});
        let solution = session.solution();

        assert_eq!(solution.len(), 17);
        assert_eq!(solution.points().first(), Some(&Cell::from(CORRIDOR_START)));
        assert_eq!(solution.points().last(), Some(&session.pose()));
    }

    // Tests playback drives the agent and blocks other activity until done
    // Verified by allowing solve requests during playback
    #[test]
    fn test_playback() {
        let mut session = corridor_session();
        let path = RecordedPath::from_points(vec![
            Cell::new(20, 25),
            Cell::new(30, 25),
            Cell::new(40, 25),
        ]);

        assert!(!session.start_playback(RecordedPath::new()));
        assert!(session.start_playback(path.clone()));
        assert!(session.is_playing_back());
        assert!(!session.start_solve());
        assert!(!session.move_agent(1, 0));
        assert!(!session.start_playback(path));

        let mut moves = 0;
        while session.tick_playback() {
            moves += 1;
        }

        assert_eq!(moves, 3);
        assert_eq!(session.pose(), Cell::new(40, 25));
        assert!(!session.is_playing_back());
        assert!(session.start_solve());
    }

    // Tests playback is refused while a solve run is active
    // Verified by checking only for an existing playback
    #[test]
    fn test_playback_refused_while_solving() {
        let mut session = corridor_session();
        session.start_solve();

        let path = RecordedPath::from_points(vec![Cell::new(20, 25)]);
        assert!(!session.start_playback(path));
        assert!(!session.tick_playback());
    }
}

//! Behaviour-driven step definitions driving the distance CLI scenarios.

use super::*;
use crate::distance::run_distance_with;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use std::cell::RefCell;

#[derive(Debug, Default)]
struct DistanceWorld {
    cli_args: RefCell<Vec<String>>,
    stdout: RefCell<Vec<u8>>,
    result: RefCell<Option<Result<(), CliError>>>,
}

impl DistanceWorld {
    fn push_args<const N: usize>(&self, args: [&str; N]) {
        self.cli_args
            .borrow_mut()
            .extend(args.into_iter().map(str::to_owned));
    }
}

#[fixture]
fn distance_world() -> DistanceWorld {
    DistanceWorld::default()
}

#[given("a start near Rabin Square and an end at HaShamen")]
fn rabin_to_hashamen(#[from(distance_world)] world: &DistanceWorld) {
    world.push_args(["--from", "32.08,34.78", "--to", "32.0849,34.7806"]);
}

#[given("a start near Rabin Square and an end at Abu Hassan")]
fn rabin_to_abu_hassan(#[from(distance_world)] world: &DistanceWorld) {
    world.push_args(["--from", "32.08,34.78", "--to", "32.0641,34.7696"]);
}

#[given("a start near Rabin Square and no end point")]
fn rabin_only(#[from(distance_world)] world: &DistanceWorld) {
    world.push_args(["--from", "32.08,34.78"]);
}

#[given("I ask for Hebrew output")]
fn hebrew_output(#[from(distance_world)] world: &DistanceWorld) {
    world.push_args(["--locale", "he"]);
}

#[when("I run the distance command")]
fn run_distance_command(#[from(distance_world)] world: &DistanceWorld) {
    let mut invocation = vec!["shawarmap".to_owned(), "distance".to_owned()];
    invocation.extend(world.cli_args.borrow().iter().cloned());
    let parsed = Cli::try_parse_from(invocation).map_err(CliError::from);
    let outcome = parsed.and_then(|cli| match cli.command {
        Command::Distance(args) => {
            let mut buffer = world.stdout.borrow_mut();
            run_distance_with(args, &mut *buffer)
        }
        Command::Nearby(_) => panic!("expected distance command"),
    });
    world.result.replace(Some(outcome));
}

fn printed(world: &DistanceWorld) -> String {
    let borrowed = world.result.borrow();
    if let Some(Err(err)) = borrowed.as_ref() {
        panic!("expected success, found {err:?}");
    }
    String::from_utf8(world.stdout.borrow().clone()).expect("stdout utf-8")
}

#[then("the command prints 548 m")]
fn prints_metres(#[from(distance_world)] world: &DistanceWorld) {
    assert_eq!(printed(world), "548 m\n");
}

#[then("the command prints 2.0 kilometres in Hebrew")]
fn prints_hebrew_kilometres(#[from(distance_world)] world: &DistanceWorld) {
    assert_eq!(printed(world), "2.0 ק\"מ\n");
}

#[then("the command fails because the end point is missing")]
fn fails_missing_end(#[from(distance_world)] world: &DistanceWorld) {
    let borrowed = world.result.borrow();
    let error = borrowed
        .as_ref()
        .expect("result recorded")
        .as_ref()
        .expect_err("expected error");
    match error {
        CliError::MissingArgument { field, env } => {
            assert_eq!(*field, ARG_TO);
            assert_eq!(*env, ENV_TO);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

macro_rules! register_distance_scenario {
    ($fn_name:ident, $scenario_title:literal) => {
        #[scenario(path = "tests/features/distance_command.feature", name = $scenario_title)]
        fn $fn_name(#[from(distance_world)] world: DistanceWorld) {
            let _ = world;
        }
    };
}

register_distance_scenario!(distance_short_walk, "measuring a short walk");
register_distance_scenario!(distance_in_hebrew, "measuring in Hebrew");
register_distance_scenario!(distance_missing_end, "rejecting a missing end point");

mod common;

use predicates::prelude::*;
use predicates::str::contains;

use common::{script_cli, temp_home, write_plain_config};

#[test]
fn script_mode_records_and_lists_expenses() {
    let home = temp_home();
    write_plain_config(&home);

    script_cli(&home)
        .write_stdin(
            "addExpense 2.12 /description hello /tag a b c\n\
             addExpense 50 /description tv /tentative\n\
             exit\n",
        )
        .assert()
        .success()
        .stdout(contains("Added expense: $2.12 hello"))
        .stdout(contains("tv (tentative)"))
        .stdout(contains("Shown: $2.12   Overall: $2.12"))
        .stdout(contains("By tag: a $2.12, b $2.12, c $2.12"));
}

#[test]
fn failures_are_reported_and_the_session_continues() {
    let home = temp_home();
    write_plain_config(&home);

    script_cli(&home)
        .write_stdin(
            "addExpense /time /time\n\
             viewExpense fortnight\n\
             addExpens 3\n\
             deleteExpense 4\n\
             addExpense 3 /description still running\n",
        )
        .assert()
        .success()
        .stdout(contains("Parameter `/time` was supplied more than once"))
        .stdout(contains("Invalid criteria `fortnight`"))
        .stdout(contains("Did you mean `addExpense`?"))
        .stdout(contains("Index 4 is out of range"))
        .stdout(contains("Added expense: $3 still running"));
}

#[test]
fn budget_pane_reports_progress() {
    let home = temp_home();
    write_plain_config(&home);

    script_cli(&home)
        .write_stdin(
            "setBudget 100 /tag food\n\
             viewBudget 1 /tag food\n\
             addExpense 120 /tag food\n\
             viewBudget 1 /tag food\n",
        )
        .assert()
        .success()
        .stdout(contains("Remaining budget: $100.00"))
        .stdout(contains("Exceeded budget by $20.00"))
        .stdout(contains("[2] (empty)"));
}

#[test]
fn help_and_version_leave_the_pane_alone() {
    let home = temp_home();
    write_plain_config(&home);

    script_cli(&home)
        .write_stdin("help addPayment\nversion\n")
        .assert()
        .success()
        .stdout(contains(
            "Usage: addPayment AMOUNT /description TEXT /due YYYY-MM-DD",
        ))
        .stdout(contains("finance_tracker 0.1.0"))
        .stdout(contains("Expenses ==").not());
}

#[test]
fn exit_stops_reading_input() {
    let home = temp_home();
    write_plain_config(&home);

    script_cli(&home)
        .write_stdin("exit\naddExpense 9 /description after exit\n")
        .assert()
        .success()
        .stdout(contains("Bye!"))
        .stdout(contains("after exit").not());
}

use super::*;
use pretty_assertions::assert_eq;

#[test]
fn session_starts_in_the_default_home() {
    let mut term = ann();
    assert_eq!(term.prompt(), "ann@codecraft:/home/ann$");
    assert_eq!(single_output(&term.execute("pwd")), "/home/ann");
}

#[test]
fn cd_up_then_list_home() {
    let mut term = ann();
    assert_eq!(body(&term.execute("cd ..")), Vec::new());
    assert_eq!(term.session().current_directory, "/home");
    assert_eq!(single_output(&term.execute("ls")), "ann");
}

#[test]
fn cd_into_a_file_is_not_a_directory() {
    let mut term = ann();
    term.execute("cd ..");
    let err = single_error(&term.execute("cd ann/about.txt"));
    assert_eq!(err, "cd: /home/ann/about.txt: Not a directory");
    assert_eq!(term.session().current_directory, "/home");
}

#[test]
fn cd_to_missing_path_leaves_directory_alone() {
    let mut term = ann();
    let err = single_error(&term.execute("cd /nowhere"));
    assert_eq!(err, "cd: /nowhere: No such file or directory");
    assert_eq!(term.session().current_directory, "/home/ann");
}

#[test]
fn cd_without_argument_or_tilde_goes_home() {
    let mut term = ann();
    term.execute("cd /team");
    term.execute("cd");
    assert_eq!(term.session().current_directory, "/home/ann");
    term.execute("cd /");
    term.execute("cd ~");
    assert_eq!(term.session().current_directory, "/home/ann");
}

#[test]
fn cd_above_root_stays_at_root() {
    let mut term = ann();
    term.execute("cd ../../../..");
    assert_eq!(term.session().current_directory, "/");
}

#[test]
fn ls_root_lists_children_sorted() {
    let mut term = ann();
    assert_eq!(
        single_output(&term.execute("ls /")),
        ".vault  README.txt  home  projects  team"
    );
}

#[test]
fn ls_on_a_file_is_rejected() {
    let mut term = ann();
    let err = single_error(&term.execute("ls about.txt"));
    assert_eq!(err, "ls: /home/ann/about.txt: Not a directory");
}

#[test]
fn cat_reads_home_files_relative_and_with_tilde() {
    let mut term = ann();
    let relative = single_output(&term.execute("cat about.txt"));
    assert_eq!(relative, "ann name\nEngineer\n\nships things");

    term.execute("cd /");
    let tilde = single_output(&term.execute("cat ~/about.txt"));
    assert_eq!(tilde, relative);
}

#[test]
fn cat_errors_name_the_problem() {
    let mut term = ann();
    assert_eq!(
        single_error(&term.execute("cat")),
        "cat: missing file operand"
    );
    assert_eq!(
        single_error(&term.execute("cat /team")),
        "cat: /team: Is a directory"
    );
    assert_eq!(
        single_error(&term.execute("cat nope.txt")),
        "cat: /home/ann/nope.txt: No such file or directory"
    );
}

#[test]
fn open_jumps_and_lists() {
    let mut term = ann();
    let listing = single_output(&term.execute("open projects"));
    assert_eq!(
        listing,
        "quality-notes.md  terminal-portfolio.md  ui-systems.md"
    );
    assert_eq!(term.session().current_directory, "/projects");
    assert_eq!(
        single_error(&term.execute("open mail")),
        "open: use `open team` or `open projects`"
    );
}

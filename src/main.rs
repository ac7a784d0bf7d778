//! press – command-line cookbook builder.
//!
//! Usage:
//!   press <recipes_dir> <images_dir> [output_dir] [--icons DIR] [--css FILE]
//!         [--title "My Cookbook"] [--write-back] [--report]
//!
//! Builds web pages under `<output_dir>/web/` and the combined print HTML
//! under `<output_dir>/print/`. `--report` only matches and prints the
//! recipes still needing images, without writing the book.

use std::{env, path::PathBuf, process};

use cookbook_press::pipeline::{build_book, match_report, BuildConfig};

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    let mut recipes_dir: Option<PathBuf> = None;
    let mut images_dir: Option<PathBuf> = None;
    let mut output_dir: Option<PathBuf> = None;
    let mut icons_dir: Option<PathBuf> = None;
    let mut css_file: Option<PathBuf> = None;
    let mut title: Option<String> = None;
    let mut write_back = false;
    let mut report_only = false;
    let mut positional = 0usize;

    let mut iter = args.iter().skip(1).peekable();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--write-back" | "-w" => write_back = true,
            "--report" | "-r" => report_only = true,
            "--icons" | "-i" => match iter.next() {
                Some(v) => icons_dir = Some(PathBuf::from(v)),
                None => {
                    eprintln!("--icons requires a directory");
                    process::exit(1);
                }
            },
            "--css" | "-c" => match iter.next() {
                Some(v) => css_file = Some(PathBuf::from(v)),
                None => {
                    eprintln!("--css requires a file");
                    process::exit(1);
                }
            },
            "--title" | "-t" => match iter.next() {
                Some(v) => title = Some(v.clone()),
                None => {
                    eprintln!("--title requires a value");
                    process::exit(1);
                }
            },
            "--help" | "-h" => {
                print_usage(&args[0]);
                process::exit(0);
            }
            other if other.starts_with('-') => {
                eprintln!("Unknown flag: {other}");
                print_usage(&args[0]);
                process::exit(1);
            }
            path => {
                match positional {
                    0 => recipes_dir = Some(PathBuf::from(path)),
                    1 => images_dir = Some(PathBuf::from(path)),
                    2 => output_dir = Some(PathBuf::from(path)),
                    _ => {
                        eprintln!("Unexpected argument: {path}");
                        print_usage(&args[0]);
                        process::exit(1);
                    }
                }
                positional += 1;
            }
        }
    }

    let (recipes_dir, images_dir) = match (recipes_dir, images_dir) {
        (Some(r), Some(i)) => (r, i),
        _ => {
            eprintln!("Error: recipes and images directories are required.");
            print_usage(&args[0]);
            process::exit(1);
        }
    };

    let mut config = BuildConfig {
        recipes_dir,
        images_dir,
        icons_dir,
        css_file,
        write_back,
        ..BuildConfig::default()
    };
    if let Some(dir) = output_dir {
        config.output_dir = dir;
    }
    if let Some(t) = title {
        config.title = t;
    }

    if report_only {
        match match_report(&config) {
            Ok(report) => print!("{report}"),
            Err(e) => {
                eprintln!("Error: {e}");
                process::exit(1);
            }
        }
        return;
    }

    match build_book(&config) {
        Ok(report) => {
            eprintln!(
                "Built {} recipe(s), {} page(s): {} matched, {} without images",
                report.recipes,
                report.pages_written,
                report.matched,
                report.unmatched.len()
            );
            for id in &report.unmatched {
                eprintln!("  needs image: {id}");
            }
        }
        Err(e) => {
            eprintln!("Error building book: {e}");
            process::exit(1);
        }
    }
}

fn print_usage(prog: &str) {
    eprintln!("press – four-language cookbook builder (cookbook-press)");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  {prog} <recipes_dir> <images_dir> [output_dir] [flags]");
    eprintln!();
    eprintln!("Arguments:");
    eprintln!("  <recipes_dir>  Directory of recipe JSON records");
    eprintln!("  <images_dir>   Directory of dish-image folders (NNN_name/dish.png)");
    eprintln!("  [output_dir]   Output root (default: output/)");
    eprintln!();
    eprintln!("Flags:");
    eprintln!("  --icons, -i    Ingredient icon directory (enables page decoration)");
    eprintln!("  --css, -c      Stylesheet file (default: built-in stylesheet)");
    eprintln!("  --title, -t    Book title (default: \"Four-Language Cookbook\")");
    eprintln!("  --write-back   Write resolved image paths back into recipe JSON");
    eprintln!("  --report, -r   Only print the match report, build nothing");
    eprintln!("  --help         Print this message");
}

use std::{
    error,
    fmt::Display,
    fs::File,
    io::{BufRead, BufReader},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::Parser;

use crate::mower::Heading;

pub mod field;
pub mod mower;

pub use field::Field;
pub use mower::Mower;

#[derive(Debug)]
pub enum Error {
    MalformedHeader(String),
    MalformedPosition(String),
    InvalidHeading(String),
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::MalformedHeader(text) => write!(
                f,
                "Expect two integers(width and length) in header line, given \"{}\".",
                text
            ),
            Error::MalformedPosition(text) => write!(
                f,
                "Expect position line of form \"<x> <y> <heading>\", given \"{}\".",
                text
            ),
            Error::InvalidHeading(text) => {
                write!(f, "Invalid heading({}), expect one of N, S, E, W.", text)
            }
        }
    }
}

impl error::Error for Error {}

#[derive(Debug, Parser)]
pub struct CLIArgs {
    pub input_path: PathBuf,
    #[arg(short, long = "output", default_value = "mowfleet.out")]
    pub output_path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MowerRecord {
    pub x: usize,
    pub y: usize,
    pub heading: Heading,
    pub instructions: String,
}

#[derive(Debug)]
pub struct Program {
    pub width: usize,
    pub length: usize,
    pub records: Vec<MowerRecord>,
}

pub fn read_program<P: AsRef<Path>>(path: P) -> Result<Program> {
    let file = File::open(&path)
        .with_context(|| format!("Failed to open given file({}).", path.as_ref().display()))?;
    let reader = BufReader::new(file);
    let mut lines = reader.lines().enumerate();

    let header = match lines.next() {
        Some((ind, line)) => line.with_context(|| {
            format!(
                "Failed to read line {} in given file({}).",
                ind + 1,
                path.as_ref().display()
            )
        })?,
        None => return Err(Error::MalformedHeader(String::new()).into()),
    };
    let (width, length) = parse_header(&header)?;

    let mut records = Vec::new();
    while let Some((ind, line)) = lines.next() {
        let position_line = line.with_context(|| {
            format!(
                "Failed to read line {} in given file({}).",
                ind + 1,
                path.as_ref().display()
            )
        })?;
        if position_line.trim().is_empty() {
            break;
        }

        let (x, y, heading) = parse_position(&position_line)?;
        let instructions = match lines.next() {
            Some((ind, line)) => line
                .with_context(|| {
                    format!(
                        "Failed to read line {} in given file({}).",
                        ind + 1,
                        path.as_ref().display()
                    )
                })?
                .trim()
                .to_string(),
            None => String::new(),
        };
        records.push(MowerRecord {
            x,
            y,
            heading,
            instructions,
        });
    }

    Ok(Program {
        width,
        length,
        records,
    })
}

fn parse_header(text: &str) -> Result<(usize, usize), Error> {
    let mut tokens = text.split_whitespace();
    match (tokens.next(), tokens.next(), tokens.next()) {
        (Some(width_text), Some(length_text), None) => {
            let width = width_text
                .parse()
                .map_err(|_| Error::MalformedHeader(text.to_string()))?;
            let length = length_text
                .parse()
                .map_err(|_| Error::MalformedHeader(text.to_string()))?;
            Ok((width, length))
        }
        _ => Err(Error::MalformedHeader(text.to_string())),
    }
}

fn parse_position(text: &str) -> Result<(usize, usize, Heading), Error> {
    let mut tokens = text.split_whitespace();
    match (tokens.next(), tokens.next(), tokens.next(), tokens.next()) {
        (Some(x_text), Some(y_text), Some(heading_text), None) => {
            let x = x_text
                .parse()
                .map_err(|_| Error::MalformedPosition(text.to_string()))?;
            let y = y_text
                .parse()
                .map_err(|_| Error::MalformedPosition(text.to_string()))?;
            let heading = parse_heading(heading_text)?;
            Ok((x, y, heading))
        }
        _ => Err(Error::MalformedPosition(text.to_string())),
    }
}

fn parse_heading(text: &str) -> Result<Heading, Error> {
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Heading::try_from(c),
        _ => Err(Error::InvalidHeading(text.to_string())),
    }
}

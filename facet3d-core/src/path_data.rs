/// Outline path-data parser (`M`, `L`, `Z`, absolute millimeters)
use nom::{
    branch::alt,
    character::complete::{char, multispace0, multispace1, one_of},
    combinator::{all_consuming, map, opt},
    multi::{many0, many1},
    number::complete::double,
    sequence::{preceded, terminated},
    IResult,
};

use crate::error::PathDataError;
use crate::point::mm_to_units;
use crate::text::{PathPoint, TextPath};

#[derive(Debug, Clone, PartialEq)]
enum Command {
    /// First pair starts a subpath, further pairs are implicit line-tos.
    Move(Vec<(f64, f64)>),
    Line(Vec<(f64, f64)>),
    Close,
}

/// Parse path data such as `M 0,0 L 10,0 L 10,10 Z` into a [`TextPath`].
///
/// `Z` appends an explicit line back to the current subpath's start, the
/// same shape a glyph layout engine hands over.
pub fn parse_path_data(input: &str) -> Result<TextPath, PathDataError> {
    let commands = match parse_commands(input) {
        Ok((_, commands)) => commands,
        Err(e) => return Err(PathDataError::Syntax(e.to_string())),
    };

    let mut path = TextPath::new();
    let mut subpath_start: Option<(i32, i32)> = None;

    for command in commands {
        match command {
            Command::Move(pairs) => {
                for (i, (x, y)) in pairs.into_iter().enumerate() {
                    let (x, y) = (mm_to_units(x), mm_to_units(y));
                    if i == 0 {
                        path.push(PathPoint::start(x, y));
                        subpath_start = Some((x, y));
                    } else {
                        path.push(PathPoint::line_to(x, y));
                    }
                }
            }
            Command::Line(pairs) => {
                if subpath_start.is_none() {
                    return Err(PathDataError::LineWithoutStart);
                }
                for (x, y) in pairs {
                    path.push(PathPoint::line_to(mm_to_units(x), mm_to_units(y)));
                }
            }
            Command::Close => {
                let (x, y) = subpath_start.ok_or(PathDataError::LineWithoutStart)?;
                path.push(PathPoint::line_to(x, y));
            }
        }
    }

    Ok(path)
}

fn parse_commands(input: &str) -> IResult<&str, Vec<Command>> {
    all_consuming(terminated(many0(parse_command), multispace0))(input)
}

fn parse_command(input: &str) -> IResult<&str, Command> {
    let (input, letter) = preceded(multispace0, one_of("MLZz"))(input)?;
    match letter {
        'M' => map(many1(parse_pair), Command::Move)(input),
        'L' => map(many1(parse_pair), Command::Line)(input),
        _ => Ok((input, Command::Close)),
    }
}

fn parse_pair(input: &str) -> IResult<&str, (f64, f64)> {
    let (input, _) = opt(separator)(input)?;
    let (input, x) = double(input)?;
    let (input, _) = opt(separator)(input)?;
    let (input, y) = double(input)?;
    Ok((input, (x, y)))
}

fn separator(input: &str) -> IResult<&str, ()> {
    let (input, _) = alt((
        map(preceded(multispace0, terminated(char(','), multispace0)), |_| ()),
        map(multispace1, |_| ()),
    ))(input)?;
    Ok((input, ()))
}

//! Text form of a transform: a bracketed list of 16 row-major numbers

use std::fmt;
use std::str::FromStr;

use nom::{
    branch::alt,
    character::complete::{char, multispace0, multispace1},
    combinator::{all_consuming, value},
    multi::separated_list1,
    number::complete::double,
    sequence::delimited,
    IResult,
};

use crate::error::TransformError;
use crate::transform::Transform;

/// Parse numbers separated by commas and/or whitespace, optionally
/// wrapped in `[` `]`
pub fn parse_values(input: &str) -> Result<Vec<f64>, TransformError> {
    match all_consuming(parse_matrix)(input) {
        Ok((_, values)) => Ok(values),
        Err(e) => Err(TransformError::Parse(format!("{:?}", e))),
    }
}

fn parse_matrix(input: &str) -> IResult<&str, Vec<f64>> {
    delimited(
        multispace0,
        alt((
            delimited(
                char('['),
                delimited(multispace0, parse_list, multispace0),
                char(']'),
            ),
            parse_list,
        )),
        multispace0,
    )(input)
}

fn parse_list(input: &str) -> IResult<&str, Vec<f64>> {
    separated_list1(parse_separator, double)(input)
}

fn parse_separator(input: &str) -> IResult<&str, ()> {
    alt((
        value((), delimited(multispace0, char(','), multispace0)),
        value((), multispace1),
    ))(input)
}

impl FromStr for Transform {
    type Err = TransformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let values = parse_values(s)?;
        Transform::from_values(&values)
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let values = self.values();
        write!(f, "[")?;
        for row in 0..4 {
            if row > 0 {
                write!(f, ",\n ")?;
            }
            let cells = &values[row * 4..row * 4 + 4];
            write!(f, "{}, {}, {}, {}", cells[0], cells[1], cells[2], cells[3])?;
        }
        write!(f, "]")
    }
}

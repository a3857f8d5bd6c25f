// Copyright 2021 A Veenstra.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0> or the
// MIT license <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your option. This file may not be copied,
// modified, or distributed except according to those terms.

use std::fmt::Debug;

use nom::bytes::complete::{is_a, tag};
use nom::character::complete::digit1;
use nom::combinator::opt;
use nom::multi::separated_list1;
use nom::IResult;

use common::UVec;

use crate::Design;

fn e2s<T: Debug>(e: T) -> String {
    format!("{:?}", e)
}

fn read_number(input: &str) -> IResult<&str, u32> {
    let (input, _) = opt(is_a(" \t\r\n"))(input)?;
    let (input, digits) = digit1(input)?;
    let (input, _) = opt(is_a(" \t\r\n"))(input)?;
    // digit1 only matches ASCII digits; overflow is the one way this can fail.
    match digits.parse::<u32>() {
        Ok(number) => Ok((input, number)),
        Err(_) => Err(nom::Err::Failure(nom::error::Error::new(digits, nom::error::ErrorKind::TooLarge))),
    }
}

fn parse_field<'t>(input: &'t str, name: &str) -> IResult<&'t str, u32> {
    let (input, _) = opt(is_a(" \t\r\n"))(input)?;
    let (input, _) = tag(name)(input)?;
    let (input, _) = opt(is_a(" \t"))(input)?;
    let (input, _) = tag(":")(input)?;
    let (input, value) = read_number(input)?;
    let (input, _) = tag(";")(input)?;
    Ok((input, value))
}

fn parse_samples(input: &str) -> IResult<&str, Vec<u32>> {
    let (input, _) = opt(is_a(" \t\r\n"))(input)?;
    let (input, _) = tag("samples")(input)?;
    let (input, _) = opt(is_a(" \t"))(input)?;
    let (input, _) = tag(":")(input)?;
    let (input, samples) = separated_list1(tag(","), read_number)(input)?;
    let (input, _) = tag(";")(input)?;
    Ok((input, samples))
}

fn parse_design(input: &str) -> IResult<&str, (Option<u32>, Vec<u32>, u32, u32, u32)> {
    let (input, m) = opt(|text| parse_field(text, "m"))(input)?;
    let (input, samples) = parse_samples(input)?;
    let (input, k) = parse_field(input, "k")?;
    let (input, j) = parse_field(input, "j")?;
    let (input, s) = parse_field(input, "s")?;
    let (input, _) = opt(is_a(" \t\r\n"))(input)?;
    Ok((input, (m, samples, k, j, s)))
}

/// Parse the textual representation of a covering-design problem.
///
/// The format is a `samples` list followed by the three parameters, with an optional label-domain
/// size `m` up front:
///
/// ```text
/// m: 45;
/// samples: 1, 2, 3, 5, 8, 13;
/// k: 4;
/// j: 4;
/// s: 3;
/// ```
///
/// When `m` is omitted it defaults to the largest sample label.
pub fn parse(text: &str) -> Result<Design, String> {
    let (rest, (m, samples, k, j, s)) = parse_design(text).map_err(e2s)?;
    if !rest.is_empty() {
        return Err(format!("Unexpected trailing input: {:?}", rest));
    }

    let m = m.unwrap_or_else(|| samples.iter().copied().max().unwrap_or(0));
    Design::new(m, UVec::from(samples), k as usize, j as usize, s as usize)
}

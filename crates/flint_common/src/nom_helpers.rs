//! nom helpers

use crate::char_class::{is_identifier_continue, is_identifier_start};
use nom::bytes::complete::take_while;
use nom::character::complete::satisfy;
use nom::combinator::recognize;
use nom::error::ParseError;
use nom::sequence::pair;
use nom::IResult;

/// Recognizes an identifier, `[XID_Start _ $][XID_Continue _ $]*`
pub fn recognize_identifier<'a, E: ParseError<&'a str>>(
    input: &'a str,
) -> IResult<&'a str, &'a str, E> {
    recognize(pair(
        satisfy(is_identifier_start),
        take_while(is_identifier_continue),
    ))(input)
}

// Copyright (C) 2022 Yehowshua Immanuel
// This program is distributed under both the GPLV3 license
// and the YEHOWSHUA license, both of which can be found at
// the root of the folder containing the sources for this program.

//! part of the vcd parser that handles `$scope` and `$var` declarations

use itertools::Itertools;

use super::combinator_atoms::{digit, tag, take_while};
use super::types::ParseResult;
use crate::error::{Error, Result};
use crate::vcd::reader::Cursor;
use crate::vcd::types::{BitIndex, Token, VarDecl, VarType};

const SCOPE_KINDS: [&str; 21] = [
    "module",
    "begin",
    "task",
    "function",
    "fork",
    "struct",
    "union",
    "class",
    "interface",
    "package",
    "program",
    "vhdl_architecture",
    "vhdl_procedure",
    "vhdl_function",
    "vhdl_record",
    "vhdl_process",
    "vhdl_block",
    "vhdl_for_generate",
    "vhdl_if_generate",
    "vhdl_generate",
    "vhdl_package",
];

// $scope module reg_mag_i $end
pub(super) fn parse_scope(words: &[(String, Cursor)], cursor: Cursor) -> Result<Token> {
    let Some((kind, cursor)) = words.first() else {
        return Err(Error::Parse {
            cursor,
            message: "`$scope` without a scope kind".to_string(),
        });
    };

    if !SCOPE_KINDS.contains(&kind.as_str()) {
        return Err(Error::Parse {
            cursor: *cursor,
            message: format!("found scope kind `{kind}` but expected one of {SCOPE_KINDS:?}"),
        });
    }

    // Some simulators emit scopes without names. We tolerate them.
    let name = words[1..].iter().map(|(word, _)| word).join(" ");

    Ok(Token::Scope {
        kind: kind.clone(),
        name,
    })
}

fn parse_var_type(word: &str, cursor: Cursor) -> Result<VarType> {
    match word {
        "event" => Ok(VarType::Event),
        "integer" => Ok(VarType::Integer),
        "parameter" => Ok(VarType::Parameter),
        "real" => Ok(VarType::Real),
        "realtime" => Ok(VarType::RealTime),
        "reg" => Ok(VarType::Reg),
        "string" => Ok(VarType::Str),
        "supply0" => Ok(VarType::Supply0),
        "supply1" => Ok(VarType::Supply1),
        "time" => Ok(VarType::Time),
        "tri" => Ok(VarType::Tri),
        "triand" => Ok(VarType::TriAnd),
        "trior" => Ok(VarType::TriOr),
        "trireg" => Ok(VarType::TriReg),
        "tri0" => Ok(VarType::Tri0),
        "tri1" => Ok(VarType::Tri1),
        "wand" => Ok(VarType::WAnd),
        "wire" => Ok(VarType::Wire),
        "wor" => Ok(VarType::WOr),
        "int" | "int_s" => Ok(VarType::SVInt),
        "shortint" => Ok(VarType::SVShortInt),
        "int_l" | "longint" => Ok(VarType::SVLongInt),
        "byte" | "char" => Ok(VarType::SVChar),
        "logic" => Ok(VarType::SVLogic),
        "bit" => Ok(VarType::SVBit),
        "shortreal" => Ok(VarType::SVShortReal),
        _ => Err(Error::Parse {
            cursor,
            message: format!("unknown variable type `{word}`"),
        }),
    }
}

/// Reads one `[n]` or `[msb:lsb]` group off the front of `text`.
fn index_group(text: &str) -> Option<(Vec<u32>, &str)> {
    let ParseResult { matched, residual } = tag(text, "[");
    if matched != "[" {
        return None;
    }

    let mut bounds = vec![];
    let mut rest = residual;
    loop {
        let bound = take_while(rest, digit);
        bounds.push(bound.matched()?.parse::<u32>().ok()?);
        let residual = bound.residual;

        if let Some(residual) = residual.strip_prefix(':') {
            rest = residual;
            continue;
        }
        let residual = residual.strip_prefix(']')?;
        return Some((bounds, residual));
    }
}

/// Classifies index text such as `[3]`, `[0][12]` or `[7:0]`.
pub(super) fn parse_bit_index(text: &str) -> BitIndex {
    if text.is_empty() {
        return BitIndex::None;
    }

    let mut groups = vec![];
    let mut rest = text;
    while !rest.is_empty() {
        match index_group(rest) {
            Some((bounds, residual)) => {
                groups.push(bounds);
                rest = residual;
            }
            None => return BitIndex::Unsupported(text.to_string()),
        }
    }

    match groups.as_slice() {
        [single] if single.len() == 1 => BitIndex::Single(single[0]),
        [range] if range.len() == 2 => BitIndex::Range(range[0], range[1]),
        [outer, inner] if outer.len() == 1 && inner.len() == 1 => {
            BitIndex::Pair(outer[0], inner[0])
        }
        _ => BitIndex::Unsupported(text.to_string()),
    }
}

// $var wire 1 " pks_ref [0][12] $end
//      ^^^^ ^ ^ ^^^^^^^ ^^^^^^^
//      type | |  name    index (may also be glued onto the name)
//       width id_code
pub(super) fn parse_var(words: &[(String, Cursor)], cursor: Cursor) -> Result<VarDecl> {
    let [(var_type, type_cursor), (width, width_cursor), (id_code, _), rest @ ..] = words else {
        return Err(Error::Parse {
            cursor,
            message: format!("incomplete `$var` declaration {words:?}"),
        });
    };

    let var_type = parse_var_type(var_type, *type_cursor)?;
    let width = width.parse::<u32>().map_err(|e| Error::Parse {
        cursor: *width_cursor,
        message: format!("failed to parse `{width}` as a bit width: {e}"),
    })?;

    let mut reference = Vec::<&str>::new();
    let mut index = String::new();
    for (word, _) in rest {
        match word.find('[') {
            Some(0) => index.push_str(word),
            Some(split) => {
                reference.push(&word[..split]);
                index.push_str(&word[split..]);
            }
            None => reference.push(word),
        }
    }

    if reference.is_empty() {
        return Err(Error::Parse {
            cursor,
            message: format!("`$var` for `{id_code}` has no name"),
        });
    }

    Ok(VarDecl {
        var_type,
        width,
        id_code: id_code.clone(),
        reference: reference.join(" "),
        bit_index: parse_bit_index(&index),
    })
}

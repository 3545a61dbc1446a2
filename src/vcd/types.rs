// Copyright (C) 2022 Yehowshua Immanuel
// This program is distributed under both the GPLV3 license
// and the YEHOWSHUA license, both of which can be found at
// the root of the folder containing the sources for this program.

use chrono::prelude::*;

/// Dump timestamps, in the dump's native time unit.
pub type Timestamp = u64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Version(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimescaleUnit {
    Fs,
    Ps,
    Ns,
    Us,
    Ms,
    S,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timescale {
    pub magnitude: u32,
    pub unit: TimescaleUnit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Date {
    Parsed(DateTime<Utc>),
    // some simulators write dates nobody can parse
    Raw(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarType {
    Event,
    Integer,
    Parameter,
    Real,
    RealTime,
    Reg,
    Str,
    Supply0,
    Supply1,
    Time,
    Tri,
    TriAnd,
    TriOr,
    TriReg,
    Tri0,
    Tri1,
    WAnd,
    Wire,
    WOr,
    SVInt,
    SVShortInt,
    SVLongInt,
    SVChar,
    SVLogic,
    SVBit,
    SVShortReal,
}

/// Shape of the index text trailing a `$var` reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BitIndex {
    /// `clk`
    None,
    /// `data[3]`
    Single(u32),
    /// `pks_ref[0][12]`, an element of an array of arrays
    Pair(u32, u32),
    /// `bus[7:0]`
    Range(u32, u32),
    /// anything else, kept verbatim for diagnostics
    Unsupported(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarDecl {
    pub var_type: VarType,
    pub width: u32,
    pub id_code: String,
    pub reference: String,
    pub bit_index: BitIndex,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarValue {
    Zero,
    One,
    /// `x`, `z` and every other level that is neither 0 nor 1
    DontCare(char),
}

/// One typed event of a dump, in stream order.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Date(Date),
    Version(Version),
    Timescale(Timescale),
    Scope { kind: String, name: String },
    Upscope,
    Var(VarDecl),
    EndDefinitions,
    ChangeTime(Timestamp),
    ChangeScalar { id_code: String, value: ScalarValue },
    ChangeVector { id_code: String, value: String },
    ChangeReal { id_code: String, value: String },
    DumpOff,
}

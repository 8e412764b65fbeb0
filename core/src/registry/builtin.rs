//! Built-in tool tables
//!
//! Each row is `(id, package)`. The id is what users type; the package is
//! what the package manager receives.

/// General development tools
pub const DEV_TOOLS: &[(&str, &str)] = &[
    ("gcc", "gcc"),
    ("g++", "g++"),
    ("cmake", "cmake"),
    ("python3", "python3"),
    ("git", "git"),
    ("make", "make"),
    ("vim", "vim"),
    ("ngspice", "ngspice"),
    ("kicad", "kicad"),
    ("verilator", "verilator"),
    ("gtkwave", "gtkwave"),
];

/// Tools required by eSim
pub const ESIM_TOOLS: &[(&str, &str)] = &[
    ("ngspice", "ngspice"),
    ("kicad", "kicad"),
    ("verilator", "verilator"),
    ("gtkwave", "gtkwave"),
    ("scilab", "scilab"),
    ("openmodelica", "openmodelica"),
    ("nghdl", "ghdl"),
    ("freehdl", "freehdl"),
];

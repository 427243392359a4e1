/******************************************************************************
 * Copyright ContinuousC. Licensed under the "Elastic License 2.0".           *
 ******************************************************************************/

//! The static unit/prefix tables. This is the sole source of truth for
//! both parsing (`parser::unit`) and printing (`print`); nothing here is
//! ever mutated, and both consumers iterate the same slices in the same
//! order.

use crate::dimension::Dimension;

/// Flags on a [`NamedQuantity`]. `BASE`/`DERIVED` mark entries eligible
/// for the SI-preferred printer; `ENTERS_AS_OPERAND` marks entries that
/// push a fresh `1`-valued quantity before being applied (this is how
/// named physical constants enter an expression). A plain `u8` bitset,
/// matching the source's `FLAG_SI_BASE_UNIT`/`FLAG_SI_DERIVED_UNIT`/
/// `FLAG_UNIT_ENTERS_AS_OPERAND` `#define`s rather than pulling in a
/// bitflags crate for three bits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Flags(u8);

impl Flags {
    pub const BASE: Flags = Flags(0b001);
    pub const DERIVED: Flags = Flags(0b010);
    pub const ENTERS_AS_OPERAND: Flags = Flags(0b100);

    pub const fn empty() -> Self {
        Flags(0)
    }

    pub const fn contains(&self, other: Flags) -> bool {
        self.0 & other.0 == other.0
    }
}

/// One entry of the unit registry: a scalar, its dimension, up to three
/// parse aliases (full name, abbreviation, alternate spelling), and flags.
#[derive(Clone, Copy, Debug)]
pub struct NamedQuantity {
    pub value: f64,
    pub dimension: Dimension,
    pub name: Option<&'static str>,
    pub abbreviation: Option<&'static str>,
    pub alt_spelling: Option<&'static str>,
    pub flags: Flags,
}

impl NamedQuantity {
    /// The three parse aliases, in the order the source tries them
    /// (name, then abbreviation, then alt spelling) — `ipass` order
    /// matters for the prefix-abbreviation restriction below.
    pub fn aliases(&self) -> [Option<(&'static str, AliasKind)>; 3] {
        [
            self.name.map(|a| (a, AliasKind::Name)),
            self.abbreviation.map(|a| (a, AliasKind::Abbreviation)),
            self.alt_spelling.map(|a| (a, AliasKind::AltSpelling)),
        ]
    }

    /// Name used by the colloquial printer: prefers the full name (e.g.
    /// `"inch"`, `"atmosphere"`).
    pub fn display_name(&self) -> &'static str {
        self.name.or(self.abbreviation).unwrap_or("?")
    }

    /// Name used by the SI-derived printer: prefers the abbreviation, to
    /// match the SI convention of writing `m`, `N`, `Hz` rather than out
    /// the full unit name.
    pub fn si_label(&self) -> &'static str {
        self.abbreviation.or(self.name).unwrap_or("?")
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AliasKind {
    Name,
    Abbreviation,
    AltSpelling,
}

/// An SI prefix: a scaling factor plus a long name and short abbreviation.
#[derive(Clone, Copy, Debug)]
pub struct SiPrefix {
    pub scale: f64,
    pub name: &'static str,
    pub abbreviation: &'static str,
}

const fn nq(
    value: f64,
    dimension: [i8; 7],
    name: Option<&'static str>,
    abbreviation: Option<&'static str>,
    alt_spelling: Option<&'static str>,
    flags: Flags,
) -> NamedQuantity {
    NamedQuantity {
        value,
        dimension: Dimension::new(dimension),
        name,
        abbreviation,
        alt_spelling,
        flags,
    }
}

const NONE: Flags = Flags::empty();

/// Registry of named quantities: SI base and derived units, customary
/// units, and operand-entry physical constants. Transcribed from the
/// original `qrpn` C implementation's `named_quantities` table (see
/// `DESIGN.md` / `SPEC_FULL.md`). Declaration order is load-bearing: the
/// colloquial printer (`print::colloquial`) picks the first match within
/// tolerance, and this order must never be permuted (e.g. by sorting).
pub static NAMED_QUANTITIES: &[NamedQuantity] = &[
    // SI base units.
    nq(1.0, [1, 0, 0, 0, 0, 0, 0], Some("metre"), Some("m"), Some("meter"), Flags::BASE),
    nq(1.0, [0, 1, 0, 0, 0, 0, 0], Some("kilogram"), Some("kg"), None, Flags::BASE),
    nq(1.0, [0, 0, 1, 0, 0, 0, 0], Some("second"), Some("s"), None, Flags::BASE),
    nq(1.0, [0, 0, 0, 1, 0, 0, 0], Some("ampere"), Some("A"), None, Flags::BASE),
    nq(1.0, [0, 0, 0, 0, 1, 0, 0], Some("kelvin"), Some("K"), None, Flags::BASE),
    nq(1.0, [0, 0, 0, 0, 0, 1, 0], Some("candela"), Some("Cd"), None, Flags::BASE),
    nq(1.0, [0, 0, 0, 0, 0, 0, 1], Some("mole"), Some("mol"), None, Flags::BASE),
    // SI derived units.
    nq(1.0, [0, 0, -1, 0, 0, 0, 0], Some("hertz"), Some("Hz"), None, Flags::DERIVED),
    nq(1.0, [1, 1, -2, 0, 0, 0, 0], Some("newton"), Some("N"), None, Flags::DERIVED),
    nq(1.0, [-1, 1, -2, 0, 0, 0, 0], Some("pascal"), Some("Pa"), None, Flags::DERIVED),
    nq(1.0, [2, 1, -2, 0, 0, 0, 0], Some("joule"), Some("J"), None, Flags::DERIVED),
    nq(1.0, [2, 1, -3, 0, 0, 0, 0], Some("watt"), Some("W"), None, Flags::DERIVED),
    nq(1.0, [0, 0, 1, 1, 0, 0, 0], Some("coulomb"), Some("C"), None, Flags::DERIVED),
    nq(1.0, [2, 1, -3, -1, 0, 0, 0], Some("volt"), Some("V"), None, Flags::DERIVED),
    nq(1.0, [-2, -1, 4, 2, 0, 0, 0], Some("farad"), Some("F"), None, Flags::DERIVED),
    nq(1.0, [2, 1, -3, -2, 0, 0, 0], Some("ohm"), Some("ohm"), None, Flags::DERIVED),
    nq(1.0, [-2, -1, 3, 2, 0, 0, 0], Some("siemens"), Some("S"), None, Flags::DERIVED),
    nq(1.0, [2, 1, -2, -1, 0, 0, 0], Some("weber"), Some("Wb"), None, Flags::DERIVED),
    nq(1.0, [0, 1, -2, -1, 0, 0, 0], Some("tesla"), Some("T"), None, Flags::DERIVED),
    nq(1.0, [2, 1, -2, -2, 0, 0, 0], Some("henry"), Some("H"), None, Flags::DERIVED),
    nq(1.0, [0, 0, -1, 0, 0, 0, 1], Some("katal"), Some("kat"), None, Flags::DERIVED),
    // Customary and miscellaneous units.
    nq(1.0, [-2, 1, -1, 0, 0, 0, 0], Some("rayl"), None, None, NONE),
    nq(100e3, [-1, 1, -2, 0, 0, 0, 0], Some("bar"), None, None, NONE),
    nq(60.0, [0, 0, 1, 0, 0, 0, 0], Some("minute"), Some("min"), None, NONE),
    nq(3600.0, [0, 0, 1, 0, 0, 0, 0], Some("hour"), Some("h"), None, NONE),
    nq(86400.0, [0, 0, 1, 0, 0, 0, 0], Some("day"), None, None, NONE),
    nq(1209600.0, [0, 0, 1, 0, 0, 0, 0], Some("fortnight"), None, None, NONE),
    nq(1.0e-15, [1, 0, 0, 0, 0, 0, 0], Some("fermi"), None, None, NONE),
    nq(1.0e-6, [1, 0, 0, 0, 0, 0, 0], Some("micron"), None, None, NONE),
    nq(1.0e-28, [2, 0, 0, 0, 0, 0, 0], Some("barn"), Some("b"), None, NONE),
    nq(1e-3, [0, 1, 0, 0, 0, 0, 0], Some("gram"), Some("gm"), None, NONE),
    nq(1e3, [0, 1, 0, 0, 0, 0, 0], Some("tonne"), Some("t"), Some("ton"), NONE),
    nq(1e-3, [3, 0, 0, 0, 0, 0, 0], Some("litre"), Some("L"), None, NONE),
    nq(1e-6, [3, 0, 0, 0, 0, 0, 0], Some("cc"), None, None, NONE),
    nq(10e3, [2, 0, 0, 0, 0, 0, 0], Some("hectare"), Some("ha"), None, NONE),
    nq(3600.0, [2, 1, -2, 0, 0, 0, 0], None, Some("Wh"), None, NONE),
    nq(3600.0, [0, 0, 1, 1, 0, 0, 0], None, Some("Ah"), None, NONE),
    nq(1.0e-2, [2, 0, -2, 0, 0, 0, 0], Some("rad"), None, None, NONE),
    nq(10e-6, [1, 1, -2, 0, 0, 0, 0], Some("dyne"), None, None, NONE),
    nq(3.7e10, [0, 0, -1, 0, 0, 0, 0], Some("curie"), Some("Ci"), None, NONE),
    nq(4.92892159375e-6, [3, 0, 0, 0, 0, 0, 0], Some("teaspoon"), Some("tsp"), None, NONE),
    nq(14.78676478125e-6, [3, 0, 0, 0, 0, 0, 0], Some("tablespoon"), Some("Tbsp"), None, NONE),
    nq(29.5735295625e-6, [3, 0, 0, 0, 0, 0, 0], Some("floz"), None, None, NONE),
    nq(236.5882365e-6, [3, 0, 0, 0, 0, 0, 0], Some("cup"), None, None, NONE),
    nq(473.176473e-6, [3, 0, 0, 0, 0, 0, 0], Some("pint"), None, None, NONE),
    nq(0.946352946e-3, [3, 0, 0, 0, 0, 0, 0], Some("quart"), None, None, NONE),
    nq(3.785411784e-3, [3, 0, 0, 0, 0, 0, 0], Some("gallon"), None, None, NONE),
    nq(1.60217657e-19, [2, 1, -2, 0, 0, 0, 0], None, Some("eV"), None, NONE),
    nq(4046.8564224, [2, 0, 0, 0, 0, 0, 0], Some("acre"), None, None, NONE),
    nq(4.184, [2, 1, -2, 0, 0, 0, 0], Some("calorie"), Some("cal"), None, NONE),
    nq(4.184e3, [2, 1, -2, 0, 0, 0, 0], None, Some("Cal"), None, NONE),
    nq(4.184e6, [2, 0, -2, 0, 0, 0, 0], Some("TNT"), None, None, NONE),
    nq(1852.0, [1, 0, 0, 0, 0, 0, 0], Some("nmi"), None, None, NONE),
    nq(0.514444444, [1, 0, -1, 0, 0, 0, 0], Some("knot"), Some("kt"), None, NONE),
    nq(1609.344, [1, 0, 0, 0, 0, 0, 0], Some("mile"), None, None, NONE),
    nq(1609.344 / 3600.0, [1, 0, -1, 0, 0, 0, 0], None, Some("mph"), None, NONE),
    nq(86400.0 * 365.2425, [0, 0, 1, 0, 0, 0, 0], Some("year"), Some("a"), None, NONE),
    nq(1852.0 * 3.0, [1, 0, 0, 0, 0, 0, 0], Some("league"), None, None, NONE),
    nq(9.8066, [1, 0, -2, 0, 0, 0, 0], Some("g"), None, None, NONE),
    nq(0.01, [1, 0, -2, 0, 0, 0, 0], Some("gal"), Some("Gal"), None, NONE),
    // Physical constants that enter expressions as operands.
    nq(
        1.3806488e-23,
        [2, 1, -2, 0, -1, 0, 0],
        Some("Boltzmann"),
        Some("k"),
        None,
        Flags::ENTERS_AS_OPERAND,
    ),
    nq(
        6371000.0,
        [1, 0, 0, 0, 0, 0, 0],
        Some("Earth radius"),
        Some("Re"),
        None,
        Flags::ENTERS_AS_OPERAND,
    ),
    nq(6.02214129e23, [0, 0, 0, 0, 0, 0, -1], Some("avogadro"), None, None, NONE),
    nq(
        6.6738480e-11,
        [3, -1, -2, 0, 0, 0, 0],
        Some("G"),
        None,
        None,
        Flags::ENTERS_AS_OPERAND,
    ),
    nq(
        5.97219e24,
        [0, 1, 0, 0, 0, 0, 0],
        Some("Me"),
        None,
        None,
        Flags::ENTERS_AS_OPERAND,
    ),
    nq(
        8.3144621,
        [2, 1, -2, 0, -1, 0, -1],
        Some("Rc"),
        None,
        None,
        Flags::ENTERS_AS_OPERAND,
    ),
    nq(
        299792458.0,
        [1, 0, -1, 0, 0, 0, 0],
        Some("c"),
        Some("c0"),
        None,
        Flags::ENTERS_AS_OPERAND,
    ),
    nq(
        1.3806488e-23,
        [2, 1, -2, 0, -1, 0, 0],
        Some("Bc"),
        None,
        None,
        Flags::ENTERS_AS_OPERAND,
    ),
    nq(
        8.854187817620e-12,
        [-3, -1, 4, 2, 0, 0, 0],
        Some("e0"),
        None,
        None,
        Flags::ENTERS_AS_OPERAND,
    ),
    nq(
        4.0e-7 * std::f64::consts::PI,
        [1, 1, -2, -2, 0, 0, 0],
        Some("u0"),
        None,
        None,
        Flags::ENTERS_AS_OPERAND,
    ),
    nq(20.779e9, [2, 0, 0, 0, 0, 0, 0], Some("Wales"), None, None, NONE),
    nq(0.0283495, [0, 1, 0, 0, 0, 0, 0], Some("ounce"), Some("oz"), None, NONE),
    nq(0.0311034768, [0, 1, 0, 0, 0, 0, 0], Some("troyoz"), None, None, NONE),
    nq(64.79891e-6, [0, 1, 0, 0, 0, 0, 0], Some("grain"), None, None, NONE),
    nq(101.325e3, [-1, 1, -2, 0, 0, 0, 0], Some("atmosphere"), Some("atm"), None, NONE),
    nq(745.699872, [2, 1, -3, 0, 0, 0, 0], Some("horsepower"), Some("hp"), None, NONE),
    nq(0.3048 * 6.0, [1, 0, 0, 0, 0, 0, 0], Some("fathom"), None, None, NONE),
    nq(0.0254, [1, 0, 0, 0, 0, 0, 0], Some("inch"), Some("in"), None, NONE),
    nq(0.3048, [1, 0, 0, 0, 0, 0, 0], Some("foot"), Some("ft"), None, NONE),
    nq(0.9144, [1, 0, 0, 0, 0, 0, 0], Some("yard"), Some("yd"), None, NONE),
    nq(201.168, [1, 0, 0, 0, 0, 0, 0], Some("furlong"), None, None, NONE),
    nq(3.08567758e16, [1, 0, 0, 0, 0, 0, 0], Some("parsec"), Some("pc"), None, NONE),
    nq(0.45359237, [0, 1, 0, 0, 0, 0, 0], Some("lbm"), None, None, NONE),
    nq(4.448222, [1, 1, -2, 0, 0, 0, 0], Some("lbf"), None, None, NONE),
    nq(6.35029318, [0, 1, 0, 0, 0, 0, 0], Some("stone"), Some("st"), None, NONE),
];

/// SI prefixes, yocto through yotta plus the non-standard `hella` (1e27).
/// Declaration order doubles as iteration order for prefix matching; it
/// carries no semantic weight there (prefixes don't overlap), unlike
/// `NAMED_QUANTITIES`'s order.
pub static SI_PREFIXES: &[SiPrefix] = &[
    SiPrefix { scale: 1e-24, name: "yocto", abbreviation: "y" },
    SiPrefix { scale: 1e-21, name: "zepto", abbreviation: "z" },
    SiPrefix { scale: 1e-18, name: "atto", abbreviation: "a" },
    SiPrefix { scale: 1e-15, name: "femto", abbreviation: "f" },
    SiPrefix { scale: 1e-12, name: "pico", abbreviation: "p" },
    SiPrefix { scale: 1e-9, name: "nano", abbreviation: "n" },
    SiPrefix { scale: 1e-6, name: "micro", abbreviation: "u" },
    SiPrefix { scale: 1e-3, name: "milli", abbreviation: "m" },
    SiPrefix { scale: 1e-2, name: "centi", abbreviation: "c" },
    SiPrefix { scale: 1e-1, name: "deci", abbreviation: "d" },
    SiPrefix { scale: 1e2, name: "hecto", abbreviation: "h" },
    SiPrefix { scale: 1e3, name: "kilo", abbreviation: "k" },
    SiPrefix { scale: 1e6, name: "mega", abbreviation: "M" },
    SiPrefix { scale: 1e9, name: "giga", abbreviation: "G" },
    SiPrefix { scale: 1e12, name: "tera", abbreviation: "T" },
    SiPrefix { scale: 1e15, name: "peta", abbreviation: "P" },
    SiPrefix { scale: 1e18, name: "exa", abbreviation: "E" },
    SiPrefix { scale: 1e21, name: "zetta", abbreviation: "Z" },
    SiPrefix { scale: 1e24, name: "yotta", abbreviation: "Y" },
    SiPrefix { scale: 1e27, name: "hella", abbreviation: "H" },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn si_base_units_round_trip_through_abbreviation() {
        for q in NAMED_QUANTITIES.iter().filter(|q| q.flags.contains(Flags::BASE)) {
            assert!(q.abbreviation.is_some());
        }
    }

    #[test]
    fn prefix_table_has_twenty_entries() {
        assert_eq!(SI_PREFIXES.len(), 20);
    }
}

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} '{name}'")]
pub struct UnknownName {
    pub kind: &'static str,
    pub name: String,
}

macro_rules! name_table {
    (
        $(#[$meta:meta])*
        $kind:literal enum $ty:ident default $default:ident {
            $($variant:ident => $name:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $ty {
            $(
                #[doc = concat!("`", $name, "`")]
                $variant,
            )+
        }

        impl $ty {
            pub const ALL: &'static [$ty] = &[$($ty::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($ty::$variant => $name,)+
                }
            }
        }

        impl Default for $ty {
            fn default() -> Self {
                $ty::$default
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = UnknownName;

            fn from_str(name: &str) -> Result<Self, Self::Err> {
                $ty::ALL
                    .iter()
                    .copied()
                    .find(|candidate| candidate.as_str() == name)
                    .ok_or_else(|| UnknownName {
                        kind: $kind,
                        name: name.to_string(),
                    })
            }
        }

        impl Serialize for $ty {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let name = String::deserialize(deserializer)?;
                name.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

name_table! {
    /// Graphviz node shapes.
    "node shape" enum NodeShape default Ellipse {
        Box => "box",
        Polygon => "polygon",
        Ellipse => "ellipse",
        Oval => "oval",
        Circle => "circle",
        Point => "point",
        Egg => "egg",
        Triangle => "triangle",
        Plaintext => "plaintext",
        Plain => "plain",
        Diamond => "diamond",
        Trapezium => "trapezium",
        Parallelogram => "parallelogram",
        House => "house",
        Pentagon => "pentagon",
        Hexagon => "hexagon",
        Septagon => "septagon",
        Octagon => "octagon",
        DoubleCircle => "doublecircle",
        DoubleOctagon => "doubleoctagon",
        TripleOctagon => "tripleoctagon",
        InvTriangle => "invtriangle",
        InvTrapezium => "invtrapezium",
        InvHouse => "invhouse",
        MDiamond => "Mdiamond",
        MSquare => "Msquare",
        MCircle => "Mcircle",
        Rect => "rect",
        Rectangle => "rectangle",
        Square => "square",
        Star => "star",
        None => "none",
        Underline => "underline",
        Cylinder => "cylinder",
        Note => "note",
        Tab => "tab",
        Folder => "folder",
        Box3d => "box3d",
        Component => "component",
        Promoter => "promoter",
        Cds => "cds",
        Terminator => "terminator",
        Utr => "utr",
        PrimerSite => "primersite",
        RestrictionSite => "restrictionsite",
        FivePOverhang => "fivepoverhang",
        ThreePOverhang => "threepoverhang",
        NOverhang => "noverhang",
        Assembly => "assembly",
        Signature => "signature",
        Insulator => "insulator",
        RiboSite => "ribosite",
        RnaStab => "rnastab",
        ProteaseSite => "proteasesite",
        ProteinStab => "proteinstab",
        RPromoter => "rpromoter",
        RArrow => "rarrow",
        LArrow => "larrow",
        LPromoter => "lpromoter",
    }
}

name_table! {
    "node style" enum NodeStyle default Normal {
        Normal => "normal",
        Dashed => "dashed",
        Dotted => "dotted",
        Solid => "solid",
        Invis => "invis",
        Bold => "bold",
        Filled => "filled",
        Striped => "striped",
        Wedged => "wedged",
        Diagonals => "diagonals",
        Rounded => "rounded",
    }
}

name_table! {
    /// Tip of an arrow. Combined with [`EdgeStyle`] it defines the whole look of an edge.
    "arrow shape" enum ArrowShape default Normal {
        Normal => "normal",
        Inv => "inv",
        Dot => "dot",
        InvDot => "invdot",
        ODot => "odot",
        InvODot => "invodot",
        None => "none",
        Tee => "tee",
        Empty => "empty",
        InvEmpty => "invempty",
        Diamond => "diamond",
        ODiamond => "odiamond",
        EDiamond => "ediamond",
        Crow => "crow",
        Box => "box",
        OBox => "obox",
        Open => "open",
        HalfOpen => "halfopen",
        Vee => "vee",
    }
}

name_table! {
    "edge style" enum EdgeStyle default Normal {
        Normal => "normal",
        Dashed => "dashed",
        Dotted => "dotted",
        Solid => "solid",
        Invis => "invis",
        Bold => "bold",
        Tapered => "tapered",
    }
}

name_table! {
    "cluster style" enum ClusterStyle default Normal {
        Normal => "normal",
        Filled => "filled",
        Striped => "striped",
        Rounded => "rounded",
    }
}

// Graphviz has no "normal" style keyword; an empty style list resets it.
const EMPTY_STYLE: &str = "\"\"";

impl NodeStyle {
    pub fn dot_token(&self) -> &'static str {
        match self {
            NodeStyle::Normal => EMPTY_STYLE,
            other => other.as_str(),
        }
    }
}

impl EdgeStyle {
    pub fn dot_token(&self) -> &'static str {
        match self {
            EdgeStyle::Normal => EMPTY_STYLE,
            other => other.as_str(),
        }
    }
}

impl ClusterStyle {
    pub fn dot_token(&self) -> &'static str {
        match self {
            ClusterStyle::Normal => EMPTY_STYLE,
            other => other.as_str(),
        }
    }
}

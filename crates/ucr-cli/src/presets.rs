//! Named hardware coupling maps.

use ucr_synth::{SynthResult, SynthesisObserver, Topology};

/// A named coupling map.
#[derive(Debug, Clone, Copy)]
pub struct Preset {
    pub name: &'static str,
    pub description: &'static str,
    pub num_qubits: usize,
    pub edges: &'static [(usize, usize)],
}

impl Preset {
    /// Build the topology of this preset.
    pub fn build(&self, observer: &dyn SynthesisObserver) -> SynthResult<Topology> {
        Topology::build(self.num_qubits, self.edges, observer)
    }
}

pub const PRESETS: &[Preset] = &[
    Preset {
        name: "r5.11l",
        description: "IBM Falcon r5.11L, 5-qubit T",
        num_qubits: 5,
        edges: &[(0, 1), (1, 2), (1, 3), (3, 4)],
    },
    Preset {
        name: "r4t",
        description: "IBM Falcon r4T, 5-qubit line",
        num_qubits: 5,
        edges: &[(0, 1), (1, 2), (2, 3), (3, 4)],
    },
    Preset {
        name: "r5.11h",
        description: "IBM Falcon r5.11H, 7-qubit H",
        num_qubits: 7,
        edges: &[(0, 1), (1, 2), (1, 3), (3, 5), (4, 5), (5, 6)],
    },
    Preset {
        name: "r4p",
        description: "IBM Falcon r4P, 16-qubit heavy-hex",
        num_qubits: 16,
        edges: &[
            (0, 1),
            (1, 4),
            (4, 7),
            (7, 10),
            (10, 12),
            (12, 15),
            (7, 6),
            (1, 2),
            (2, 3),
            (12, 13),
            (13, 14),
            (3, 5),
            (5, 8),
            (8, 11),
            (11, 14),
            (8, 9),
        ],
    },
    Preset {
        name: "r5.11",
        description: "IBM Falcon r5.11, 27-qubit heavy-hex",
        num_qubits: 27,
        edges: &[
            (0, 1),
            (1, 4),
            (4, 7),
            (7, 10),
            (10, 12),
            (12, 15),
            (15, 18),
            (18, 21),
            (21, 23),
            (6, 7),
            (17, 18),
            (1, 2),
            (2, 3),
            (12, 13),
            (13, 14),
            (23, 24),
            (24, 25),
            (3, 5),
            (5, 8),
            (8, 11),
            (11, 14),
            (14, 16),
            (16, 19),
            (19, 22),
            (22, 25),
            (25, 26),
            (8, 9),
            (19, 20),
        ],
    },
];

/// Look up a preset by name, ignoring case.
pub fn find(name: &str) -> Option<&'static Preset> {
    let name = name.to_lowercase();
    PRESETS.iter().find(|p| p.name == name)
}

/// Names of all presets.
pub fn names() -> Vec<&'static str> {
    PRESETS.iter().map(|p| p.name).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ucr_synth::NoopObserver;

    #[test]
    fn test_all_presets_build() {
        for preset in PRESETS {
            let topology = preset.build(&NoopObserver).unwrap();
            assert_eq!(topology.num_qubits(), preset.num_qubits);
            assert_eq!(topology.edges().len(), preset.num_qubits - 1 + cycles(preset));
        }
    }

    // Heavy-hex presets contain rings, the small ones are trees.
    fn cycles(preset: &Preset) -> usize {
        match preset.name {
            "r4p" => 1,
            "r5.11" => 2,
            _ => 0,
        }
    }

    #[test]
    fn test_find_case_insensitive() {
        assert_eq!(find("R5.11H").map(|p| p.num_qubits), Some(7));
        assert!(find("r9").is_none());
    }
}

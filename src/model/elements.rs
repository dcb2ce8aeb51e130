// src/model/elements.rs

/// (symbol, name) indexed by Z - 1.
const ELEMENTS: [(&str, &str); 118] = [
    // --- Period 1 ---
    ("H", "Hydrogen"), ("He", "Helium"),
    // --- Period 2 ---
    ("Li", "Lithium"), ("Be", "Beryllium"), ("B", "Boron"), ("C", "Carbon"),
    ("N", "Nitrogen"), ("O", "Oxygen"), ("F", "Fluorine"), ("Ne", "Neon"),
    // --- Period 3 ---
    ("Na", "Sodium"), ("Mg", "Magnesium"), ("Al", "Aluminium"), ("Si", "Silicon"),
    ("P", "Phosphorus"), ("S", "Sulfur"), ("Cl", "Chlorine"), ("Ar", "Argon"),
    // --- Period 4 ---
    ("K", "Potassium"), ("Ca", "Calcium"), ("Sc", "Scandium"), ("Ti", "Titanium"),
    ("V", "Vanadium"), ("Cr", "Chromium"), ("Mn", "Manganese"), ("Fe", "Iron"),
    ("Co", "Cobalt"), ("Ni", "Nickel"), ("Cu", "Copper"), ("Zn", "Zinc"),
    ("Ga", "Gallium"), ("Ge", "Germanium"), ("As", "Arsenic"), ("Se", "Selenium"),
    ("Br", "Bromine"), ("Kr", "Krypton"),
    // --- Period 5 ---
    ("Rb", "Rubidium"), ("Sr", "Strontium"), ("Y", "Yttrium"), ("Zr", "Zirconium"),
    ("Nb", "Niobium"), ("Mo", "Molybdenum"), ("Tc", "Technetium"), ("Ru", "Ruthenium"),
    ("Rh", "Rhodium"), ("Pd", "Palladium"), ("Ag", "Silver"), ("Cd", "Cadmium"),
    ("In", "Indium"), ("Sn", "Tin"), ("Sb", "Antimony"), ("Te", "Tellurium"),
    ("I", "Iodine"), ("Xe", "Xenon"),
    // --- Period 6 ---
    ("Cs", "Caesium"), ("Ba", "Barium"), ("La", "Lanthanum"), ("Ce", "Cerium"),
    ("Pr", "Praseodymium"), ("Nd", "Neodymium"), ("Pm", "Promethium"), ("Sm", "Samarium"),
    ("Eu", "Europium"), ("Gd", "Gadolinium"), ("Tb", "Terbium"), ("Dy", "Dysprosium"),
    ("Ho", "Holmium"), ("Er", "Erbium"), ("Tm", "Thulium"), ("Yb", "Ytterbium"),
    ("Lu", "Lutetium"), ("Hf", "Hafnium"), ("Ta", "Tantalum"), ("W", "Tungsten"),
    ("Re", "Rhenium"), ("Os", "Osmium"), ("Ir", "Iridium"), ("Pt", "Platinum"),
    ("Au", "Gold"), ("Hg", "Mercury"), ("Tl", "Thallium"), ("Pb", "Lead"),
    ("Bi", "Bismuth"), ("Po", "Polonium"), ("At", "Astatine"), ("Rn", "Radon"),
    // --- Period 7 ---
    ("Fr", "Francium"), ("Ra", "Radium"), ("Ac", "Actinium"), ("Th", "Thorium"),
    ("Pa", "Protactinium"), ("U", "Uranium"), ("Np", "Neptunium"), ("Pu", "Plutonium"),
    ("Am", "Americium"), ("Cm", "Curium"), ("Bk", "Berkelium"), ("Cf", "Californium"),
    ("Es", "Einsteinium"), ("Fm", "Fermium"), ("Md", "Mendelevium"), ("No", "Nobelium"),
    ("Lr", "Lawrencium"), ("Rf", "Rutherfordium"), ("Db", "Dubnium"), ("Sg", "Seaborgium"),
    ("Bh", "Bohrium"), ("Hs", "Hassium"), ("Mt", "Meitnerium"), ("Ds", "Darmstadtium"),
    ("Rg", "Roentgenium"), ("Cn", "Copernicium"), ("Nh", "Nihonium"), ("Fl", "Flerovium"),
    ("Mc", "Moscovium"), ("Lv", "Livermorium"), ("Ts", "Tennessine"), ("Og", "Oganesson"),
];

/// Returns the atomic number (Z) for an element symbol, 0 if unknown.
/// The free neutron ("n" / "NN" in some tables) has Z = 0 as well.
pub fn get_atomic_number(symbol: &str) -> u32 {
    ELEMENTS
        .iter()
        .position(|(s, _)| s.eq_ignore_ascii_case(symbol.trim()))
        .map(|i| i as u32 + 1)
        .unwrap_or(0)
}

pub fn symbol_for_z(z: u32) -> Option<&'static str> {
    let idx = (z as usize).checked_sub(1)?;
    ELEMENTS.get(idx).map(|(s, _)| *s)
}

pub fn element_name(symbol: &str) -> Option<&'static str> {
    match get_atomic_number(symbol) {
        0 => None,
        z => ELEMENTS.get(z as usize - 1).map(|(_, name)| *name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_both_ways() {
        assert_eq!(get_atomic_number("C"), 6);
        assert_eq!(get_atomic_number("og"), 118);
        assert_eq!(symbol_for_z(26), Some("Fe"));
        assert_eq!(symbol_for_z(0), None);
        assert_eq!(symbol_for_z(119), None);
    }

    #[test]
    fn test_names() {
        assert_eq!(element_name("He"), Some("Helium"));
        assert_eq!(element_name("Xx"), None);
        for z in 1..=118 {
            let sym = symbol_for_z(z).unwrap();
            assert_eq!(get_atomic_number(sym), z, "{}", sym);
        }
    }
}

use crate::models::plant::PlantSummary;

/// (id, name, category, image path)
const CATALOG: &[(&str, &str, &str, &str)] = &[
    ("1", "Chives", "Alliums", "/images/alliums/chives.jpg"),
    ("2", "Garlic", "Alliums", "/images/alliums/garlic.jpg"),
    ("3", "Leeks", "Alliums", "/images/alliums/leeks.jpg"),
    ("4", "Onions", "Alliums", "/images/alliums/onions.jpg"),
    ("5", "Shallot", "Alliums", "/images/alliums/shallot.jpg"),
    ("6", "Bok Choy", "Cole Crops", "/images/cole/bokchoy.jpg"),
    ("7", "Broccoli", "Cole Crops", "/images/cole/broccoli.jpg"),
    ("8", "Brussels Sprouts", "Cole Crops", "/images/cole/brusselssprouts.jpg"),
    ("9", "Cabbage", "Cole Crops", "/images/cole/cabbage.jpg"),
    ("10", "Cauliflower", "Cole Crops", "/images/cole/cauliflower.jpg"),
    ("11", "Rose", "Flowers", "/images/flowers/rose.jpg"),
    ("12", "Tulip", "Flowers", "/images/flowers/tulip.jpg"),
    ("13", "Daisy", "Flowers", "/images/flowers/daisy.jpg"),
    ("14", "Sunflower", "Flowers", "/images/flowers/sunflower.jpg"),
    ("15", "Orchid", "Flowers", "/images/flowers/orchid.jpg"),
    ("16", "Apple", "Fruits", "/images/fruits/apple.jpg"),
    ("17", "Banana", "Fruits", "/images/fruits/banana.jpg"),
    ("18", "Orange", "Fruits", "/images/fruits/orange.jpg"),
    ("19", "Strawberry", "Fruits", "/images/fruits/strawberry.jpg"),
    ("20", "Grape", "Fruits", "/images/fruits/grape.jpg"),
    ("21", "Wheat", "Grains", "/images/grains/wheat.jpg"),
    ("22", "Rice", "Grains", "/images/grains/rice.jpg"),
    ("23", "Corn", "Grains", "/images/grains/corn.jpg"),
    ("24", "Barley", "Grains", "/images/grains/barley.jpg"),
    ("25", "Oats", "Grains", "/images/grains/oats.jpg"),
    ("26", "Spinach", "Greens", "/images/greens/spinach.jpg"),
    ("27", "Kale", "Greens", "/images/greens/kale.jpg"),
    ("28", "Swiss Chard", "Greens", "/images/greens/swisschard.jpg"),
    ("29", "Arugula", "Greens", "/images/greens/arugula.jpg"),
    ("30", "Lettuce", "Greens", "/images/greens/lettuce.jpg"),
    ("31", "Basil", "Herbs", "/images/herbs/basil.jpg"),
    ("32", "Rosemary", "Herbs", "/images/herbs/rosemary.jpg"),
    ("33", "Thyme", "Herbs", "/images/herbs/thyme.jpg"),
    ("34", "Mint", "Herbs", "/images/herbs/mint.jpg"),
    ("35", "Oregano", "Herbs", "/images/herbs/oregano.jpg"),
    ("36", "Peas", "Legumes", "/images/legumes/peas.jpg"),
    ("37", "Beans", "Legumes", "/images/legumes/beans.jpg"),
    ("38", "Lentils", "Legumes", "/images/legumes/lentils.jpg"),
    ("39", "Chickpeas", "Legumes", "/images/legumes/chickpeas.jpg"),
    ("40", "Soybeans", "Legumes", "/images/legumes/soybeans.jpg"),
    ("41", "Tomato", "Nightshades", "/images/nightshades/tomato.jpg"),
    ("42", "Eggplant", "Nightshades", "/images/nightshades/eggplant.jpg"),
    ("43", "Bell Pepper", "Nightshades", "/images/nightshades/bellpepper.jpg"),
    ("44", "Chili Pepper", "Nightshades", "/images/nightshades/chilipepper.jpg"),
    ("45", "Potato", "Nightshades", "/images/nightshades/potato.jpg"),
    ("46", "Zucchini", "Squash", "/images/squash/zucchini.jpg"),
    ("47", "Cucumber", "Squash", "/images/squash/cucumber.jpg"),
    ("48", "Pumpkin", "Squash", "/images/squash/pumpkin.jpg"),
    ("49", "Squash", "Squash", "/images/squash/squash.jpg"),
    ("50", "Okra", "Squash", "/images/squash/okra.jpg"),
    ("51", "Carrot", "Root Vegetables", "/images/roots/carrot.jpg"),
    ("52", "Beet", "Root Vegetables", "/images/roots/beet.jpg"),
    ("53", "Radish", "Root Vegetables", "/images/roots/radish.jpg"),
    ("54", "Turnip", "Root Vegetables", "/images/roots/turnip.jpg"),
    ("55", "Parsnip", "Root Vegetables", "/images/roots/parsnip.jpg"),
];

/// Returns the whole plant catalogue, in catalogue order.
pub fn get_all_plants() -> Vec<PlantSummary> {
    CATALOG
        .iter()
        .map(|&(id, name, category, image)| PlantSummary {
            id: id.into(),
            name: name.into(),
            category: category.into(),
            image: image.into(),
        })
        .collect()
}

pub fn get_plant_by_id(id: &str) -> Option<PlantSummary> {
    get_all_plants().into_iter().find(|p| p.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique() {
        let plants = get_all_plants();
        let mut ids: Vec<_> = plants.iter().map(|p| p.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), plants.len());
    }

    #[test]
    fn test_lookup_by_id() {
        assert_eq!(get_plant_by_id("41").map(|p| p.name), Some("Tomato".into()));
        assert!(get_plant_by_id("does-not-exist").is_none());
    }
}

use crate::model::{Ingredient, IngredientSlot, RecipeRecord};

/// Flatten the numbered ingredient slots of a record into display order.
///
/// A slot contributes an [`Ingredient`] only if its name is non-blank after
/// trimming. A missing or blank measure becomes an empty string. Output keeps
/// ascending slot order.
pub fn extract(record: &RecipeRecord) -> Vec<Ingredient> {
    record.slots.iter().filter_map(ingredient_from_slot).collect()
}

fn ingredient_from_slot(slot: &IngredientSlot) -> Option<Ingredient> {
    let name = slot.ingredient.as_deref().map(str::trim)?;
    if name.is_empty() {
        return None;
    }

    let measure = slot.measure.as_deref().map(str::trim).unwrap_or_default();
    Some(Ingredient::new(name, measure))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_skips_blank_names() {
        let record = RecipeRecord::new("52772", "Teriyaki Chicken")
            .with_ingredient(1, "Chicken", Some("2 pieces"))
            .with_ingredient(2, "", Some("1/4 cup"))
            .with_ingredient(3, "Soy Sauce", None);

        assert_eq!(
            extract(&record),
            vec![
                Ingredient::new("Chicken", "2 pieces"),
                Ingredient::new("Soy Sauce", ""),
            ]
        );
    }

    #[test]
    fn test_extract_trims_name_and_measure() {
        let record = RecipeRecord::new("1", "Salad")
            .with_ingredient(1, "  Lettuce ", Some(" 1 head  "))
            .with_ingredient(2, "   ", Some("2 tbsp"))
            .with_ingredient(3, "Oil", Some("   "));

        assert_eq!(
            extract(&record),
            vec![Ingredient::new("Lettuce", "1 head"), Ingredient::new("Oil", "")]
        );
    }

    #[test]
    fn test_extract_keeps_slot_order_across_gaps() {
        let record = RecipeRecord::new("1", "Stew")
            .with_ingredient(20, "Salt", Some("pinch"))
            .with_ingredient(7, "Beef", Some("1kg"))
            .with_ingredient(1, "Onion", None);

        let names: Vec<_> = extract(&record).into_iter().map(|i| i.name).collect();
        assert_eq!(names, vec!["Onion", "Beef", "Salt"]);
    }

    #[test]
    fn test_extract_empty_record() {
        assert!(extract(&RecipeRecord::new("1", "Nothing")).is_empty());
    }

    #[test]
    fn test_measure_without_name_is_dropped() {
        let mut record = RecipeRecord::new("1", "Odd");
        record.slots[4].measure = Some("3 cups".to_string());

        assert!(extract(&record).is_empty());
    }
}

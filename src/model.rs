use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Number of numbered ingredient/measure field pairs a remote record carries.
pub const MAX_INGREDIENT_SLOTS: usize = 20;

/// Shown in place of a missing thumbnail.
pub const PLACEHOLDER_THUMBNAIL: &str = "data:image/svg+xml;base64,PHN2ZyB3aWR0aD0iNDAwIiBoZWlnaHQ9IjMwMCIgeG1sbnM9Imh0dHA6Ly93d3cudzMub3JnLzIwMDAvc3ZnIj4KICA8cmVjdCB3aWR0aD0iNDAwIiBoZWlnaHQ9IjMwMCIgZmlsbD0iI2U1ZTdlYiIvPgogIDx0ZXh0IHg9IjUwJSIgeT0iNTAlIiBmb250LWZhbWlseT0iQXJpYWwiIGZvbnQtc2l6ZT0iMjAiIGZpbGw9IiM5Y2EzYWYiIHRleHQtYW5jaG9yPSJtaWRkbGUiIGR5PSIuM2VtIj5ObyBJbWFnZTwvdGV4dD4KPC9zdmc+";

/// One raw `(strIngredientN, strMeasureN)` pair, exactly as the API sent it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngredientSlot {
    pub ingredient: Option<String>,
    pub measure: Option<String>,
}

impl IngredientSlot {
    pub fn new(ingredient: impl Into<String>, measure: Option<&str>) -> Self {
        Self {
            ingredient: Some(ingredient.into()),
            measure: measure.map(String::from),
        }
    }
}

/// A single recipe as returned by the remote database.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeRecord {
    pub id: String,
    pub name: String,
    pub category: String,
    pub area: String,
    pub instructions: Option<String>,
    pub thumbnail: Option<String>,
    pub tags: Option<String>,
    pub youtube: Option<String>,
    pub source: Option<String>,
    pub slots: [IngredientSlot; MAX_INGREDIENT_SLOTS],
}

/// An ingredient line ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ingredient {
    pub name: String,
    pub measure: String,
}

impl Ingredient {
    pub fn new(name: impl Into<String>, measure: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            measure: measure.into(),
        }
    }
}

impl RecipeRecord {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    /// Fill the 1-based `slot`. Slots outside `1..=20` are ignored.
    pub fn with_ingredient(mut self, slot: usize, name: &str, measure: Option<&str>) -> Self {
        if let Some(target) = slot
            .checked_sub(1)
            .and_then(|index| self.slots.get_mut(index))
        {
            *target = IngredientSlot::new(name, measure);
        }
        self
    }

    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = Some(instructions.into());
        self
    }

    /// Tags from the comma separated `strTags` field.
    pub fn tag_list(&self) -> Vec<&str> {
        self.tags
            .as_deref()
            .map(|tags| {
                tags.split(',')
                    .map(str::trim)
                    .filter(|tag| !tag.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn thumbnail_or_placeholder(&self) -> &str {
        self.thumbnail
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or(PLACEHOLDER_THUMBNAIL)
    }
}

impl TryFrom<Value> for RecipeRecord {
    type Error = String;

    /// Read one meal object field by field. Named fields and slots that are
    /// absent or not strings degrade to empty; only a missing `idMeal`
    /// rejects the record.
    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let mut fields = match value {
            Value::Object(fields) => fields,
            other => return Err(format!("expected a meal object, got {}", other)),
        };

        let id = take_string(&mut fields, "idMeal")
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| "meal has no usable idMeal".to_string())?;

        let mut slots: [IngredientSlot; MAX_INGREDIENT_SLOTS] = Default::default();
        for (index, slot) in slots.iter_mut().enumerate() {
            let n = index + 1;
            slot.ingredient = take_string(&mut fields, &format!("strIngredient{}", n));
            slot.measure = take_string(&mut fields, &format!("strMeasure{}", n));
        }

        Ok(RecipeRecord {
            id,
            name: take_string(&mut fields, "strMeal").unwrap_or_default(),
            category: take_string(&mut fields, "strCategory").unwrap_or_default(),
            area: take_string(&mut fields, "strArea").unwrap_or_default(),
            instructions: take_string(&mut fields, "strInstructions"),
            thumbnail: non_blank(take_string(&mut fields, "strMealThumb")),
            tags: non_blank(take_string(&mut fields, "strTags")),
            youtube: non_blank(take_string(&mut fields, "strYoutube")),
            source: non_blank(take_string(&mut fields, "strSource")),
            slots,
        })
    }
}

fn take_string(fields: &mut Map<String, Value>, key: &str) -> Option<String> {
    match fields.remove(key) {
        Some(Value::String(s)) => Some(s),
        _ => None,
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

/// Envelope both endpoints answer with; `meals` is `null` when nothing matched.
///
/// Meals are kept as raw JSON so one malformed entry cannot sink the rest.
#[derive(Debug, Deserialize)]
pub struct MealResponse {
    #[serde(default)]
    pub meals: Option<Vec<Value>>,
}

impl MealResponse {
    /// Convert every usable meal, in response order, skipping the others.
    pub fn into_records(self) -> Vec<RecipeRecord> {
        self.meals
            .unwrap_or_default()
            .into_iter()
            .filter_map(|meal| match RecipeRecord::try_from(meal) {
                Ok(record) => Some(record),
                Err(e) => {
                    warn!("Skipping meal: {}", e);
                    None
                }
            })
            .collect()
    }
}

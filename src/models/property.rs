use serde::{Deserialize, Serialize};

use super::UnknownVariant;

string_enum! {
    pub enum PropertyType ("propertyType") {
        House => "House",
        Plot => "Plot",
        Commercial => "Commercial",
        Apartment => "Apartment",
    }
}

string_enum! {
    pub enum PriceType ("priceType") {
        ForSale => "For Sale",
        ForRent => "For Rent",
    }
}

string_enum! {
    pub enum PropertyStatus ("status") {
        Available => "Available",
        Sold => "Sold",
        Rented => "Rented",
        UnderContract => "Under Contract",
    }
}

string_enum! {
    pub enum Society ("society") {
        DhaPhase1 => "DHA Phase 1",
        DhaPhase2 => "DHA Phase 2",
        DhaPhase3 => "DHA Phase 3",
        DhaPhase4 => "DHA Phase 4",
        DhaPhase5 => "DHA Phase 5",
        DhaPhase6 => "DHA Phase 6",
        DhaPhase7 => "DHA Phase 7",
        DhaPhase8 => "DHA Phase 8",
        BahriaTownPhase1 => "Bahria Town Phase 1",
        BahriaTownPhase2 => "Bahria Town Phase 2",
        BahriaTownPhase3 => "Bahria Town Phase 3",
        BahriaTownPhase4 => "Bahria Town Phase 4",
        BahriaTownPhase5 => "Bahria Town Phase 5",
        BahriaTownPhase6 => "Bahria Town Phase 6",
        BahriaTownPhase7 => "Bahria Town Phase 7",
        BahriaTownPhase8 => "Bahria Town Phase 8",
        GulbergGreens => "Gulberg Greens",
        GulbergResidencia => "Gulberg Residencia",
        GulbergHeights => "Gulberg Heights",
        ParkViewCity => "Park View City",
        ParkViewVillas => "Park View Villas",
        CapitalSmartCity => "Capital Smart City",
        CapitalValley => "Capital Valley",
        BlueWorldCity => "Blue World City",
        BlueWorldCitySportsValley => "Blue World City Sports Valley",
        LahoreSmartCity => "Lahore Smart City",
        LahoreGardens => "Lahore Gardens",
        IslamabadGardens => "Islamabad Gardens",
        IslamabadHeights => "Islamabad Heights",
        FaisalTown => "Faisal Town",
        GardenTown => "Garden Town",
        ModelTown => "Model Town",
        JoharTown => "Johar Town",
        WapdaTown => "Wapda Town",
        Askari => "Askari",
        Cantt => "Cantt",
        Defence => "Defence",
        Gulberg => "Gulberg",
        Other => "Other",
    }
}

string_enum! {
    pub enum Feature ("feature") {
        CornerPlot => "Corner Plot",
        MainBoulevard => "Main Boulevard",
        ParkFacing => "Park Facing",
        CornerHouse => "Corner House",
        ServantQuarter => "Servant Quarter",
        Garage => "Garage",
        Garden => "Garden",
        SwimmingPool => "Swimming Pool",
        Security => "Security",
        Electricity => "Electricity",
        Gas => "Gas",
        Water => "Water",
        Sewerage => "Sewerage",
        RoadAccess => "Road Access",
        BoundaryWall => "Boundary Wall",
        ReadyToBuild => "Ready to Build",
        UnderConstruction => "Under Construction",
    }
}

/// Plot size in marla. `1` is the code for one canal (25 marla).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct MarlaSize(i32);

impl MarlaSize {
    pub const ALLOWED: [i32; 7] = [1, 3, 4, 5, 6, 7, 10];

    pub const ONE_CANAL: Self = Self(1);

    #[must_use]
    pub const fn value(self) -> i32 {
        self.0
    }

    #[must_use]
    pub fn category(self) -> Option<Category> {
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.marla_sizes().contains(&self.0))
    }

    #[must_use]
    pub fn category_label(self) -> &'static str {
        self.category().map_or("Other", Category::label)
    }
}

impl TryFrom<i32> for MarlaSize {
    type Error = UnknownVariant;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        if Self::ALLOWED.contains(&value) {
            Ok(Self(value))
        } else {
            Err(UnknownVariant {
                field: "marlaSize",
                value: value.to_string(),
            })
        }
    }
}

impl std::str::FromStr for MarlaSize {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: i32 = s.trim().parse().map_err(|_| UnknownVariant {
            field: "marlaSize",
            value: s.to_string(),
        })?;
        Self::try_from(value)
    }
}

impl<'de> Deserialize<'de> for MarlaSize {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = i32::deserialize(deserializer)?;
        Self::try_from(raw).map_err(serde::de::Error::custom)
    }
}

/// Listing category, addressed by URL code and backed by a fixed marla set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    ThreeToFourMarla,
    FiveToSevenMarla,
    TenMarla,
    OneCanal,
}

impl Category {
    pub const ALL: [Self; 4] = [
        Self::ThreeToFourMarla,
        Self::FiveToSevenMarla,
        Self::TenMarla,
        Self::OneCanal,
    ];

    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.code() == code)
    }

    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::ThreeToFourMarla => "3-4-marla",
            Self::FiveToSevenMarla => "5-7-marla",
            Self::TenMarla => "10-marla",
            Self::OneCanal => "1-canal",
        }
    }

    #[must_use]
    pub const fn marla_sizes(self) -> &'static [i32] {
        match self {
            Self::ThreeToFourMarla => &[3, 4],
            Self::FiveToSevenMarla => &[5, 6, 7],
            Self::TenMarla => &[10],
            Self::OneCanal => &[1],
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::ThreeToFourMarla => "3-4 Marla Project",
            Self::FiveToSevenMarla => "5-7 Marla Project",
            Self::TenMarla => "10 Marla Project",
            Self::OneCanal => "1 Canal Project",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyImage {
    pub filename: String,
    pub original_name: String,
    pub path: String,
    pub uploaded_at: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub location: String,
    pub marla_size: MarlaSize,
    pub property_type: PropertyType,
    pub society: Society,
    pub price: i64,
    pub price_type: PriceType,
    pub images: Vec<PropertyImage>,
    pub features: Vec<Feature>,
    pub status: PropertyStatus,
    pub contact_info: ContactInfo,
    pub created_at: String,
    pub updated_at: String,
}

/// Validated input for a new listing.
#[derive(Debug, Clone)]
pub struct NewProperty {
    pub title: String,
    pub description: String,
    pub location: String,
    pub marla_size: MarlaSize,
    pub property_type: PropertyType,
    pub society: Society,
    pub price: i64,
    pub price_type: PriceType,
    pub features: Vec<Feature>,
    pub status: PropertyStatus,
    pub contact_info: ContactInfo,
    pub images: Vec<PropertyImage>,
}

/// Fields an admin edit may touch. `None` leaves the stored value alone.
#[derive(Debug, Clone, Default)]
pub struct PropertyChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub marla_size: Option<MarlaSize>,
    pub property_type: Option<PropertyType>,
    pub society: Option<Society>,
    pub price: Option<i64>,
    pub price_type: Option<PriceType>,
    pub features: Option<Vec<Feature>>,
    pub status: Option<PropertyStatus>,
    pub contact_name: Option<String>,
    pub contact_phone: Option<String>,
    pub contact_email: Option<String>,
    pub images: Option<Vec<PropertyImage>>,
}

/// Search criteria; every field is optional and they combine with AND.
#[derive(Debug, Clone, Default)]
pub struct PropertyFilter {
    pub text: Option<String>,
    pub category: Option<Category>,
    pub society: Option<Society>,
    pub price_type: Option<PriceType>,
    pub min_price: Option<i64>,
    pub max_price: Option<i64>,
    pub status: Option<PropertyStatus>,
}

impl PropertyFilter {
    #[must_use]
    pub fn by_category(category: Category) -> Self {
        Self {
            category: Some(category),
            ..Self::default()
        }
    }
}

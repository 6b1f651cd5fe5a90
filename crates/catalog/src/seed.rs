//! The storefront's fixed product list.

use vitashop_core::ProductId;

use crate::product::{Category, Product};

struct Row {
    id: u32,
    name: &'static str,
    category: Category,
    price: u64,
    description: &'static str,
    icon: &'static str,
    rating: f32,
    reviews: u32,
}

const ROWS: [Row; 12] = [
    Row {
        id: 1,
        name: "종합 비타민",
        category: Category::Vitamins,
        price: 25_000,
        description: "하루 필요한 모든 비타민과 미네랄을 한 번에",
        icon: "fas fa-capsules",
        rating: 4.8,
        reviews: 1250,
    },
    Row {
        id: 2,
        name: "비타민 D3",
        category: Category::Vitamins,
        price: 18_000,
        description: "뼈 건강과 면역력 강화에 필수적인 비타민 D3",
        icon: "fas fa-sun",
        rating: 4.9,
        reviews: 890,
    },
    Row {
        id: 3,
        name: "비타민 C",
        category: Category::Vitamins,
        price: 12_000,
        description: "항산화 효과와 면역력 향상에 도움",
        icon: "fas fa-lemon",
        rating: 4.7,
        reviews: 2100,
    },
    Row {
        id: 4,
        name: "웨이 프로틴",
        category: Category::Protein,
        price: 45_000,
        description: "고품질 단백질로 근육 성장과 회복 지원",
        icon: "fas fa-dumbbell",
        rating: 4.8,
        reviews: 1560,
    },
    Row {
        id: 5,
        name: "크레아틴",
        category: Category::Protein,
        price: 32_000,
        description: "운동 성능 향상과 근력 증가에 도움",
        icon: "fas fa-fire",
        rating: 4.6,
        reviews: 780,
    },
    Row {
        id: 6,
        name: "BCAA",
        category: Category::Protein,
        price: 28_000,
        description: "근육 보호와 회복을 위한 필수 아미노산",
        icon: "fas fa-atom",
        rating: 4.7,
        reviews: 920,
    },
    Row {
        id: 7,
        name: "오메가3",
        category: Category::Omega,
        price: 35_000,
        description: "뇌 건강과 심혈관 건강에 필수적인 오메가3",
        icon: "fas fa-fish",
        rating: 4.9,
        reviews: 1890,
    },
    Row {
        id: 8,
        name: "코엔자임 Q10",
        category: Category::Omega,
        price: 42_000,
        description: "에너지 생산과 항산화에 도움",
        icon: "fas fa-bolt",
        rating: 4.5,
        reviews: 650,
    },
    Row {
        id: 9,
        name: "홍삼",
        category: Category::Herbal,
        price: 55_000,
        description: "전통 한방의 지혜, 면역력과 활력 증진",
        icon: "fas fa-seedling",
        rating: 4.8,
        reviews: 1340,
    },
    Row {
        id: 10,
        name: "프로폴리스",
        category: Category::Herbal,
        price: 38_000,
        description: "천연 항균 성분으로 면역력 강화",
        icon: "fas fa-leaf",
        rating: 4.6,
        reviews: 980,
    },
    Row {
        id: 11,
        name: "마그네슘",
        category: Category::Vitamins,
        price: 15_000,
        description: "근육 이완과 수면 개선에 도움",
        icon: "fas fa-moon",
        rating: 4.4,
        reviews: 720,
    },
    Row {
        id: 12,
        name: "콜라겐",
        category: Category::Protein,
        price: 48_000,
        description: "피부 탄력과 관절 건강에 도움",
        icon: "fas fa-heart",
        rating: 4.7,
        reviews: 1680,
    },
];

pub(crate) fn products() -> Vec<Product> {
    ROWS.iter()
        .map(|row| Product {
            id: ProductId::new(row.id),
            name: row.name.to_string(),
            category: row.category,
            price: row.price,
            description: row.description.to_string(),
            icon: row.icon.to_string(),
            rating: row.rating,
            reviews: row.reviews,
        })
        .collect()
}

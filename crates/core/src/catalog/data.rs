//! The baseline menu.

use super::{Catalog, Category, CategoryIcon, Product};
use crate::types::{CategoryId, Discount, HexColor, Price, ProductId, Rating};

struct Row {
    id: i32,
    name: &'static str,
    description: &'static str,
    cents: u32,
    original_cents: Option<u32>,
    discount: u8,
    rating_tenths: Option<u8>,
    category: i32,
    featured: bool,
    color: &'static str,
    checkout_url: Option<&'static str>,
    image_url: &'static str,
}

impl Row {
    fn into_product(self) -> Product {
        let checkout_url = self
            .checkout_url
            .map_or_else(|| format!("/product/{}/checkout", self.id), ToString::to_string);
        Product {
            id: ProductId::new(self.id),
            name: self.name.to_string(),
            description: self.description.to_string(),
            price: Price::from_cents(self.cents),
            original_price: self.original_cents.map(Price::from_cents),
            discount: Discount::clamped(self.discount),
            rating: self.rating_tenths.map(Rating::clamped_tenths),
            category_id: CategoryId::new(self.category),
            is_featured: self.featured,
            color: HexColor::parse(self.color).ok(),
            checkout_url,
            image_url: self.image_url.to_string(),
        }
    }
}

const ROWS: [Row; 16] = [
    Row {
        id: 1,
        name: "Pizza de calabresa",
        description: "Deliciosa pizza com molho de tomate artesanal, queijo mussarela derretido e generosas fatias de calabresa crocante sobre uma massa macia e dourada.",
        cents: 2999,
        original_cents: Some(3499),
        discount: 15,
        rating_tenths: Some(48),
        category: 1,
        featured: true,
        color: "F44336",
        checkout_url: Some("https://web.syncpay.pro/v3/checkout/?id=3pksi2vdkw8nkmzoc5mlyjb9"),
        image_url: "https://www.minhareceita.com.br/app/uploads/2022/12/pizza-de-pepperoni-caseira-portal-minha-receita.jpg",
    },
    Row {
        id: 2,
        name: "Pizza Pepperoni",
        description: "Molho de tomate, mussarela e pepperoni",
        cents: 3299,
        original_cents: Some(3799),
        discount: 13,
        rating_tenths: Some(47),
        category: 1,
        featured: false,
        color: "E53935",
        checkout_url: None,
        image_url: "/images/pizza-pepperoni.jpg",
    },
    Row {
        id: 3,
        name: "Hambúrguer Clássico",
        description: "Burger 150g, queijo, alface, tomate e maionese especial",
        cents: 2499,
        original_cents: Some(2999),
        discount: 16,
        rating_tenths: Some(46),
        category: 2,
        featured: true,
        color: "F4511E",
        checkout_url: None,
        image_url: "/images/hamburguer-classico.jpg",
    },
    Row {
        id: 4,
        name: "Hambúrguer Duplo",
        description: "Dois burgers 150g, queijo cheddar, cebola caramelizada e molho especial",
        cents: 3499,
        original_cents: Some(3999),
        discount: 12,
        rating_tenths: Some(49),
        category: 2,
        featured: false,
        color: "FF7043",
        checkout_url: None,
        image_url: "/images/hamburguer-duplo.jpg",
    },
    Row {
        id: 5,
        name: "Macarrão Carbonara",
        description: "Espaguete, ovo, queijo parmesão, bacon e pimenta preta",
        cents: 2799,
        original_cents: None,
        discount: 0,
        rating_tenths: Some(45),
        category: 3,
        featured: false,
        color: "FB8C00",
        checkout_url: None,
        image_url: "/images/macarrao-carbonara.jpg",
    },
    Row {
        id: 6,
        name: "Lasanha Bolonhesa",
        description: "Camadas de massa intercaladas com molho bolonhesa e bechamel",
        cents: 3199,
        original_cents: Some(3699),
        discount: 13,
        rating_tenths: Some(47),
        category: 3,
        featured: true,
        color: "FF9800",
        checkout_url: None,
        image_url: "/images/lasanha-bolonhesa.jpg",
    },
    Row {
        id: 7,
        name: "Pudim de Leite",
        description: "Pudim de leite condensado com calda de caramelo",
        cents: 1299,
        original_cents: None,
        discount: 0,
        rating_tenths: Some(46),
        category: 4,
        featured: false,
        color: "7B1FA2",
        checkout_url: None,
        image_url: "/images/pudim-de-leite.jpg",
    },
    Row {
        id: 8,
        name: "Brownie com Sorvete",
        description: "Brownie quente com sorvete de baunilha e calda de chocolate",
        cents: 1699,
        original_cents: Some(1999),
        discount: 15,
        rating_tenths: Some(48),
        category: 4,
        featured: true,
        color: "9C27B0",
        checkout_url: None,
        image_url: "/images/brownie-com-sorvete.jpg",
    },
    Row {
        id: 9,
        name: "Refrigerante",
        description: "Coca-Cola, Pepsi, Guaraná Antarctica ou Sprite (lata 350ml)",
        cents: 599,
        original_cents: None,
        discount: 0,
        rating_tenths: None,
        category: 5,
        featured: false,
        color: "1976D2",
        checkout_url: None,
        image_url: "/images/refrigerante.jpg",
    },
    Row {
        id: 10,
        name: "Suco Natural",
        description: "Laranja, abacaxi, morango ou limão (300ml)",
        cents: 899,
        original_cents: None,
        discount: 0,
        rating_tenths: Some(45),
        category: 5,
        featured: false,
        color: "2196F3",
        checkout_url: None,
        image_url: "/images/suco-natural.jpg",
    },
    Row {
        id: 11,
        name: "Hambúrguer Vegano",
        description: "Burger de lentilha e cogumelos, alface, tomate e maionese vegana",
        cents: 2699,
        original_cents: Some(2999),
        discount: 10,
        rating_tenths: Some(44),
        category: 6,
        featured: false,
        color: "43A047",
        checkout_url: None,
        image_url: "/images/hamburguer-vegano.jpg",
    },
    Row {
        id: 12,
        name: "Pizza Vegana",
        description: "Molho de tomate, queijo vegano e legumes assados",
        cents: 3599,
        original_cents: None,
        discount: 0,
        rating_tenths: Some(43),
        category: 6,
        featured: false,
        color: "4CAF50",
        checkout_url: None,
        image_url: "/images/pizza-vegana.jpg",
    },
    Row {
        id: 13,
        name: "Bowl de Açaí",
        description: "Açaí puro com banana, granola e mel",
        cents: 1899,
        original_cents: Some(2199),
        discount: 13,
        rating_tenths: Some(47),
        category: 7,
        featured: true,
        color: "00897B",
        checkout_url: None,
        image_url: "/images/bowl-de-acai.jpg",
    },
    Row {
        id: 14,
        name: "Salada Caesar",
        description: "Alface americana, frango grelhado, croutons, queijo parmesão e molho Caesar",
        cents: 2299,
        original_cents: None,
        discount: 0,
        rating_tenths: Some(45),
        category: 7,
        featured: false,
        color: "009688",
        checkout_url: None,
        image_url: "/images/salada-caesar.jpg",
    },
    Row {
        id: 15,
        name: "Combo Pizza + Refrigerante",
        description: "Pizza média (até 2 sabores) + refrigerante 2L",
        cents: 4999,
        original_cents: Some(5999),
        discount: 16,
        rating_tenths: Some(48),
        category: 8,
        featured: true,
        color: "C2185B",
        checkout_url: None,
        image_url: "/images/combo-pizza-refrigerante.jpg",
    },
    Row {
        id: 16,
        name: "Combo Família",
        description: "2 hambúrgueres + 2 batatas médias + 4 refrigerantes",
        cents: 7499,
        original_cents: Some(8999),
        discount: 16,
        rating_tenths: Some(49),
        category: 8,
        featured: false,
        color: "D81B60",
        checkout_url: None,
        image_url: "/images/combo-familia.jpg",
    },
];

const CATEGORIES: [(i32, &str, CategoryIcon, &str); 8] = [
    (1, "Pizzas", CategoryIcon::Pizza, "E53935"),
    (2, "Hambúrgueres", CategoryIcon::Burger, "F4511E"),
    (3, "Massas", CategoryIcon::Pasta, "FB8C00"),
    (4, "Sobremesas", CategoryIcon::Dessert, "7B1FA2"),
    (5, "Bebidas", CategoryIcon::Drink, "1976D2"),
    (6, "Veganos", CategoryIcon::Leaf, "43A047"),
    (7, "Saudáveis", CategoryIcon::Food, "00897B"),
    (8, "Promoções", CategoryIcon::Discount, "C2185B"),
];

pub(super) fn baseline() -> Catalog {
    let products = ROWS.into_iter().map(Row::into_product).collect();
    let categories = CATEGORIES
        .into_iter()
        .map(|(id, name, icon, color)| Category {
            id: CategoryId::new(id),
            name: name.to_string(),
            icon,
            color: HexColor::parse(color).ok(),
        })
        .collect();
    Catalog::new(products, categories)
}

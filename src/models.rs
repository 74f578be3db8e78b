use diesel::prelude::Insertable;
use rust_decimal::Decimal;

use crate::schema::{items, itemsinorder, users};

#[derive(Insertable, Debug)]
#[diesel(table_name = users)]
pub struct NewUser{
    pub login: String,
    pub password: String,
    pub role: String,
    pub favoriteitems: Option<String>,
    pub phonenum: Option<String>
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = items)]
pub struct MenuItem{
    pub itemname: String,
    pub ingredients: Option<String>,
    pub typeofitem: Option<String>,
    pub price: Decimal,
    pub description: Option<String>
}

#[derive(Insertable, Debug)]
#[diesel(table_name = itemsinorder)]
pub struct OrderLineModel{
    pub orderid: i32,
    pub itemname: String,
    pub quantity: i32
}

use rust_decimal::Decimal;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderLine{
    pub item_name: String,
    pub quantity: i32
}

// Items collected while placing an order, in entry order.
// Adding an item that is already present increases its quantity.
#[derive(Debug, Default, Clone)]
pub struct Basket{
    lines: Vec<OrderLine>
}

impl Basket{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, item_name: String, quantity: i32) -> Result<(), String> {
        if quantity <= 0 {
            return Err("Quantity must be a positive whole number.".to_string())
        }

        match self.lines.iter_mut().find(|line| line.item_name == item_name) {
            Some(line) => {
                line.quantity = line.quantity
                    .checked_add(quantity)
                    .ok_or_else(|| "Quantity is too large.".to_string())?;
            },
            None => self.lines.push(OrderLine{ item_name, quantity })
        }

        Ok(())
    }

    pub fn lines(&self) -> &[OrderLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn item_names(&self) -> Vec<String> {
        self.lines.iter().map(|line| line.item_name.clone()).collect()
    }
}

// Sum of price * quantity; `price_of` returns None for unknown items
pub fn total_price<F>(lines: &[OrderLine], mut price_of: F) -> Result<Decimal, String>
where
    F: FnMut(&str) -> Option<Decimal>
{
    lines.iter().try_fold(Decimal::ZERO, |total, line| {
        let price = price_of(&line.item_name)
                        .ok_or_else(|| line.item_name.clone())?;
        Ok(total + price * Decimal::from(line.quantity))
    })
}
